//! Login session handling.
//!
//! Authentication is mocked: any e-mail and password signs in, and the role
//! is derived from the e-mail address. The signed-in user is persisted under
//! one storage key, so the session survives a restart until someone logs
//! out. None of the order paths consult the session.

use desk_storage::{StorageError, StorageService};
use desk_types::{Role, SecretString, StorageKey, User};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

const SESSION_ID: &str = "current";

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
	/// Error that occurs when persisting or clearing the session.
	#[error("Session storage error: {0}")]
	Storage(String),
}

/// Manages the signed-in user.
pub struct SessionService {
	storage: Arc<StorageService>,
}

impl SessionService {
	/// Creates a session service over the given storage.
	pub fn new(storage: Arc<StorageService>) -> Self {
		Self { storage }
	}

	/// Signs a user in.
	///
	/// The password is accepted and dropped; any credentials work. The role
	/// comes from the e-mail address and the display name from its local
	/// part.
	pub async fn login(&self, email: &str, password: SecretString) -> Result<User, SessionError> {
		drop(password);
		let user = User {
			id: Uuid::new_v4().to_string(),
			name: display_name(email),
			email: email.to_string(),
			role: derive_role(email),
		};
		self.persist(&user).await?;
		tracing::info!(email = %user.email, role = %user.role, "User logged in");
		Ok(user)
	}

	/// Registers a new account and signs it in.
	///
	/// New accounts always start with the basic role, whatever the e-mail
	/// looks like.
	pub async fn signup(
		&self,
		name: &str,
		email: &str,
		password: SecretString,
	) -> Result<User, SessionError> {
		drop(password);
		let user = User {
			id: Uuid::new_v4().to_string(),
			name: name.to_string(),
			email: email.to_string(),
			role: Role::User,
		};
		self.persist(&user).await?;
		tracing::info!(email = %user.email, "User signed up");
		Ok(user)
	}

	/// Returns the signed-in user, if any.
	///
	/// An unreadable stored session is treated as signed out after logging
	/// what happened.
	pub async fn current_user(&self) -> Option<User> {
		match self
			.storage
			.retrieve::<User>(StorageKey::Session.as_str(), SESSION_ID)
			.await
		{
			Ok(user) => Some(user),
			Err(StorageError::NotFound) => None,
			Err(e) => {
				tracing::warn!("Failed to restore session: {}", e);
				None
			}
		}
	}

	/// Signs the current user out. Signing out twice is fine.
	pub async fn logout(&self) -> Result<(), SessionError> {
		match self
			.storage
			.remove(StorageKey::Session.as_str(), SESSION_ID)
			.await
		{
			Ok(()) | Err(StorageError::NotFound) => Ok(()),
			Err(e) => Err(SessionError::Storage(e.to_string())),
		}
	}

	async fn persist(&self, user: &User) -> Result<(), SessionError> {
		self.storage
			.store(StorageKey::Session.as_str(), SESSION_ID, user)
			.await
			.map_err(|e| SessionError::Storage(e.to_string()))
	}
}

/// Derives the access role from an e-mail address.
///
/// "superadmin" anywhere, or "admin@" (the whole local part), outranks a
/// plain "admin" substring; the checks are case-sensitive and first match
/// wins.
fn derive_role(email: &str) -> Role {
	if email.contains("superadmin") || email.contains("admin@") {
		Role::Superadmin
	} else if email.contains("admin") {
		Role::Admin
	} else if email.contains("staff") {
		Role::Staff
	} else {
		Role::User
	}
}

/// Builds a display name from the local part of an e-mail address.
///
/// Dots and underscores become spaces and every word is capitalized, so
/// "jane.cooper@example.com" signs in as "Jane Cooper".
fn display_name(email: &str) -> String {
	let local = email.split('@').next().unwrap_or(email);
	let spaced = local.replace(['.', '_'], " ");
	spaced
		.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use desk_storage::implementations::memory::MemoryStorage;

	fn service() -> SessionService {
		let storage = StorageService::new(Box::new(MemoryStorage::new()));
		SessionService::new(Arc::new(storage))
	}

	#[test]
	fn test_role_derivation_table() {
		assert_eq!(derive_role("superadmin@orderdesk.co"), Role::Superadmin);
		assert_eq!(derive_role("admin@orderdesk.co"), Role::Superadmin);
		assert_eq!(derive_role("jane.admin@orderdesk.co"), Role::Admin);
		assert_eq!(derive_role("staff.rota@orderdesk.co"), Role::Staff);
		assert_eq!(derive_role("jane.cooper@example.com"), Role::User);
	}

	#[test]
	fn test_display_name_from_local_part() {
		assert_eq!(display_name("jane.cooper@example.com"), "Jane Cooper");
		assert_eq!(display_name("wade_warren@example.com"), "Wade Warren");
		assert_eq!(display_name("esther@example.com"), "Esther");
	}

	#[tokio::test]
	async fn test_session_round_trip() {
		let service = service();
		assert!(service.current_user().await.is_none());

		let user = service
			.login("jane.admin@orderdesk.co", SecretString::from("hunter2"))
			.await
			.unwrap();
		assert_eq!(user.name, "Jane Admin");
		assert_eq!(user.role, Role::Admin);

		let restored = service.current_user().await.unwrap();
		assert_eq!(restored, user);

		service.logout().await.unwrap();
		assert!(service.current_user().await.is_none());
		// Logging out again is a no-op.
		service.logout().await.unwrap();
	}

	#[tokio::test]
	async fn test_signup_starts_as_user() {
		let service = service();
		let user = service
			.signup(
				"Admin Adams",
				"admin.adams@example.com",
				SecretString::from("hunter2"),
			)
			.await
			.unwrap();
		assert_eq!(user.role, Role::User);
		assert_eq!(user.name, "Admin Adams");
	}

	#[tokio::test]
	async fn test_password_never_persisted() {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		let service = SessionService::new(storage.clone());
		service
			.login("jane.cooper@example.com", SecretString::from("hunter2"))
			.await
			.unwrap();
		let stored: serde_json::Value = storage
			.retrieve(StorageKey::Session.as_str(), SESSION_ID)
			.await
			.unwrap();
		assert!(!stored.to_string().contains("hunter2"));
	}
}
