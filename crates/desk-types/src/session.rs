//! Session types for the order desk system.
//!
//! Identity is a boundary concern: the order store and the search engine
//! never consult it. These types model the signed-in user and the role
//! hierarchy used to gate administrative pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access roles, ordered from least to most privileged.
///
/// The wire form matches the variant name exactly ("Staff", "Superadmin"),
/// which is also what stored sessions contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
	/// Read-only access.
	User,
	/// Workshop staff.
	Staff,
	/// Administrator.
	Admin,
	/// Full access including user management.
	Superadmin,
}

impl Role {
	/// Returns the numeric rank of this role within the hierarchy.
	pub fn rank(&self) -> u8 {
		match self {
			Role::User => 1,
			Role::Staff => 2,
			Role::Admin => 3,
			Role::Superadmin => 4,
		}
	}

	/// Returns true when this role meets or exceeds the required role.
	pub fn at_least(&self, required: Role) -> bool {
		self.rank() >= required.rank()
	}

	/// Returns the string representation of the role.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::User => "User",
			Role::Staff => "Staff",
			Role::Admin => "Admin",
			Role::Superadmin => "Superadmin",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for Role {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"User" => Ok(Self::User),
			"Staff" => Ok(Self::Staff),
			"Admin" => Ok(Self::Admin),
			"Superadmin" => Ok(Self::Superadmin),
			_ => Err(()),
		}
	}
}

/// The signed-in user held by the session context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// Opaque identifier assigned at login.
	pub id: String,
	/// Display name derived from the e-mail address.
	pub name: String,
	/// E-mail address the user signed in with.
	pub email: String,
	/// Access role derived at login.
	pub role: Role,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_hierarchy() {
		assert!(Role::Superadmin.at_least(Role::Admin));
		assert!(Role::Admin.at_least(Role::Admin));
		assert!(!Role::Staff.at_least(Role::Admin));
		assert!(Role::Staff.at_least(Role::User));
	}

	#[test]
	fn test_role_wire_form_is_capitalized() {
		let json = serde_json::to_string(&Role::Superadmin).unwrap();
		assert_eq!(json, "\"Superadmin\"");
		let parsed: Role = serde_json::from_str("\"Staff\"").unwrap();
		assert_eq!(parsed, Role::Staff);
		assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
	}
}
