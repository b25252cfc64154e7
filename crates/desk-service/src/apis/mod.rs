//! HTTP API handlers for the order desk, one module per resource.

pub mod dashboard;
pub mod integrations;
pub mod orders;
pub mod session;
