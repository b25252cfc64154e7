//! Session endpoints.
//!
//! Sign-in is mocked, so these handlers mostly shuttle the session in and
//! out of storage. Passwords ride in a [`SecretString`] and never reach a
//! log line or the stored session.

use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use desk_types::{APIError, SecretString, User};
use serde::Deserialize;

/// Credentials for POST /api/session.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: SecretString,
}

/// Body for POST /api/session/signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
	pub name: String,
	pub email: String,
	pub password: SecretString,
}

/// Handles POST /api/session requests.
pub async fn login(
	State(state): State<AppState>,
	Json(request): Json<LoginRequest>,
) -> Result<Json<User>, APIError> {
	match state
		.desk
		.session()
		.login(&request.email, request.password)
		.await
	{
		Ok(user) => Ok(Json(user)),
		Err(e) => {
			tracing::warn!("Login failed: {}", e);
			Err(internal(e.to_string()))
		}
	}
}

/// Handles POST /api/session/signup requests.
pub async fn signup(
	State(state): State<AppState>,
	Json(request): Json<SignupRequest>,
) -> Result<Json<User>, APIError> {
	match state
		.desk
		.session()
		.signup(&request.name, &request.email, request.password)
		.await
	{
		Ok(user) => Ok(Json(user)),
		Err(e) => {
			tracing::warn!("Signup failed: {}", e);
			Err(internal(e.to_string()))
		}
	}
}

/// Handles GET /api/session requests.
pub async fn current(State(state): State<AppState>) -> Result<Json<User>, APIError> {
	match state.desk.session().current_user().await {
		Some(user) => Ok(Json(user)),
		None => Err(APIError::NotFound {
			error_type: "NO_ACTIVE_SESSION".to_string(),
			message: "No user is signed in".to_string(),
		}),
	}
}

/// Handles DELETE /api/session requests.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, APIError> {
	match state.desk.session().logout().await {
		Ok(()) => Ok(StatusCode::NO_CONTENT),
		Err(e) => {
			tracing::warn!("Logout failed: {}", e);
			Err(internal(e.to_string()))
		}
	}
}

fn internal(message: String) -> APIError {
	APIError::InternalServerError {
		error_type: "INTERNAL_ERROR".to_string(),
		message,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apis::testing;
	use desk_types::Role;

	#[tokio::test]
	async fn test_session_round_trip() {
		let state = testing::state().await;

		let err = current(State(state.clone())).await.unwrap_err();
		assert_eq!(err.status_code(), 404);

		let Json(user) = login(
			State(state.clone()),
			Json(LoginRequest {
				email: "jane.admin@orderdesk.co".to_string(),
				password: SecretString::from("hunter2"),
			}),
		)
		.await
		.unwrap();
		assert_eq!(user.name, "Jane Admin");
		assert_eq!(user.role, Role::Admin);

		let Json(restored) = current(State(state.clone())).await.unwrap();
		assert_eq!(restored, user);

		let status = logout(State(state.clone())).await.unwrap();
		assert_eq!(status, StatusCode::NO_CONTENT);
		assert!(current(State(state)).await.is_err());
	}

	#[tokio::test]
	async fn test_signup_signs_in_basic_user() {
		let state = testing::state().await;
		let Json(user) = signup(
			State(state.clone()),
			Json(SignupRequest {
				name: "Admin Adams".to_string(),
				email: "admin.adams@example.com".to_string(),
				password: SecretString::from("hunter2"),
			}),
		)
		.await
		.unwrap();
		assert_eq!(user.role, Role::User);

		let Json(restored) = current(State(state)).await.unwrap();
		assert_eq!(restored.email, "admin.adams@example.com");
	}
}
