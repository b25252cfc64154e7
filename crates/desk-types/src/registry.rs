//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable backend implementations
//! use to register themselves with their configuration name and factory
//! function.

/// Base trait for implementation registries.
///
/// Each backend module (the file and memory storage backends, for example)
/// provides a Registry struct that implements this trait, so every
/// implementation declares its configuration name and a factory function.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the key used in the TOML configuration, for example:
	/// - "file" for storage.implementations.file
	/// - "memory" for storage.implementations.memory
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	///
	/// Each module defines its own factory type, for example StorageFactory
	/// for storage implementations.
	type Factory;

	/// Get the factory function for this implementation.
	///
	/// Returns the factory function that can create instances of this
	/// implementation when provided with the appropriate configuration.
	fn factory() -> Self::Factory;
}
