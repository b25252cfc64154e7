//! Common types module for the order desk system.
//!
//! This module defines the core data types and structures shared by the
//! order desk crates. It provides a centralized location for shared types
//! to ensure consistency across storage, the engine and the HTTP service.

/// API types for HTTP endpoints and error responses.
pub mod api;
/// Order domain types: orders, marketplaces, statuses and product details.
pub mod order;
/// Registry trait for self-registering backend implementations.
pub mod registry;
/// Secure string type for sensitive values such as login passwords.
pub mod secret_string;
/// Session types: users and the role hierarchy.
pub mod session;
/// Storage namespace types for persistent data.
pub mod storage;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use order::*;
pub use registry::*;
pub use secret_string::*;
pub use session::*;
pub use storage::*;
pub use validation::*;
