//! Secure string type for handling sensitive data like login passwords.
//!
//! The mock login accepts a password it never inspects or stores. Wrapping it
//! in `SecretString` guarantees the value is zeroed on drop and can never
//! leak through logs, debug output or serialized session records.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string whose memory is zeroed on drop and which is redacted in all
/// textual output.
///
/// Use this for any sensitive string data such as passwords or API tokens.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Creates a new SecretString from a regular string.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret string as a string slice.
	///
	/// # Security Warning
	/// This method exposes the actual secret. Use it only when absolutely
	/// necessary and ensure the exposed value is not logged or stored.
	pub fn expose_secret(&self) -> &str {
		&self.0
	}

	/// Exposes the secret string to a closure for processing.
	///
	/// This is a safer way to access the secret as it limits the scope
	/// where the secret is exposed.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}

	/// Returns the length of the secret string.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the secret string is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0.as_str() == other.0.as_str()
	}
}

impl Eq for SecretString {}

// Serialization always redacts; a secret never round-trips through JSON.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secret_string_debug() {
		let secret = SecretString::from("hunter2");
		let debug_str = format!("{:?}", secret);
		assert_eq!(debug_str, "SecretString(***REDACTED***)");
		assert!(!debug_str.contains("hunter2"));
	}

	#[test]
	fn test_secret_string_display() {
		let secret = SecretString::from("hunter2");
		let display_str = format!("{}", secret);
		assert_eq!(display_str, "***REDACTED***");
		assert!(!display_str.contains("hunter2"));
	}

	#[test]
	fn test_secret_string_expose() {
		let secret = SecretString::from("hunter2");
		assert_eq!(secret.expose_secret(), "hunter2");
	}

	#[test]
	fn test_serialization_redacts() {
		let secret = SecretString::from("hunter2");
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, "\"***REDACTED***\"");
	}

	#[test]
	fn test_with_exposed() {
		let secret = SecretString::from("correct horse");

		let result = secret.with_exposed(|s| {
			assert_eq!(s, "correct horse");
			s.len()
		});
		assert_eq!(result, 13);

		let debug_str = format!("{:?}", secret);
		assert!(!debug_str.contains("correct horse"));
	}
}
