//! Storage-related types for the order desk system.

use std::str::FromStr;

/// Storage namespaces for the persisted data collections.
///
/// This enum provides type safety for storage operations by replacing
/// string literals with strongly typed variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Namespace holding the full order collection under a single entry
	Orders,
	/// Namespace holding the transient one-shot sync marker
	Sync,
	/// Namespace holding the persisted session user
	Session,
}

impl StorageKey {
	/// Returns the string representation of the storage namespace.
	pub fn as_str(&self) -> &'static str {
		match self {
			StorageKey::Orders => "orders",
			StorageKey::Sync => "sync",
			StorageKey::Session => "session",
		}
	}

	/// Returns an iterator over all StorageKey variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Orders, Self::Sync, Self::Session].into_iter()
	}
}

impl FromStr for StorageKey {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"orders" => Ok(Self::Orders),
			"sync" => Ok(Self::Sync),
			"session" => Ok(Self::Session),
			_ => Err(()),
		}
	}
}

impl From<StorageKey> for &'static str {
	fn from(key: StorageKey) -> Self {
		key.as_str()
	}
}
