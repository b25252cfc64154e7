//! Configuration module for the order desk system.
//!
//! This module provides structures and utilities for managing order desk
//! configuration. It supports loading configuration from TOML files,
//! resolving `${VAR}` environment references, and validating that all
//! required values are properly set before the service starts.

use desk_types::Marketplace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the order desk.
///
/// This structure contains all configuration sections required for the
/// service to operate: desk identity, the storage backend, the simulated
/// sync behaviour, seed data and the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this desk instance.
	pub desk: DeskConfig,
	/// Configuration for the storage backend.
	pub storage: StorageConfig,
	/// Configuration for the simulated marketplace sync and submit delays.
	#[serde(default)]
	pub sync: SyncConfig,
	/// Configuration for the built-in seed dataset.
	#[serde(default)]
	pub seed: SeedConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to this desk instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeskConfig {
	/// Unique identifier for this desk instance, used in log output.
	pub id: String,
}

/// Configuration for the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
	/// Which implementation to use as primary.
	pub primary: String,
	/// Map of storage implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
}

/// Configuration for the simulated marketplace sync and submit delays.
///
/// The delays imitate network latency for flows that have no real remote
/// counterpart yet. A running sync always sleeps the full delay and then
/// completes; there is no timeout or cancellation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
	/// Fixed delay in milliseconds for a marketplace sync.
	#[serde(default = "default_sync_delay_ms")]
	pub delay_ms: u64,
	/// Fixed delay in milliseconds for an add-order submission.
	#[serde(default = "default_submit_delay_ms")]
	pub submit_delay_ms: u64,
	/// Marketplaces with a connected integration. Only these can be synced.
	#[serde(default = "default_connected")]
	pub connected: Vec<String>,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			delay_ms: default_sync_delay_ms(),
			submit_delay_ms: default_submit_delay_ms(),
			connected: default_connected(),
		}
	}
}

/// Returns the default marketplace sync delay in milliseconds.
///
/// This matches the latency the front-end simulated for a sync, so the
/// affordance stays visibly "running" for a moment.
fn default_sync_delay_ms() -> u64 {
	1500
}

/// Returns the default add-order submit delay in milliseconds.
fn default_submit_delay_ms() -> u64 {
	500
}

/// Returns the marketplaces connected by default.
fn default_connected() -> Vec<String> {
	vec!["Amazon".to_string(), "Shopify".to_string()]
}

/// Configuration for the built-in seed dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
	/// Whether an empty or unreadable store is seeded with the built-in
	/// dataset on first load.
	#[serde(default = "default_seed_enabled")]
	pub enabled: bool,
}

impl Default for SeedConfig {
	fn default() -> Self {
		Self {
			enabled: default_seed_enabled(),
		}
	}
}

/// Returns whether seeding is enabled by default.
fn default_seed_enabled() -> bool {
	true
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

/// Returns the default API host.
///
/// This provides a default host address of 127.0.0.1 (localhost) for the
/// API server when no explicit host is configured.
fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

/// Returns the default API port.
///
/// Port 3000 is what the front-end's service layer expects to find the
/// backend on when no explicit base URL is configured.
fn default_api_port() -> u16 {
	3000
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to prevent ReDoS attacks
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)));
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file with environment variable resolution.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let contents = tokio::fs::read_to_string(path).await?;
		contents.parse()
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// This method performs validation across all configuration sections:
	/// - Ensures the desk ID is not empty
	/// - Validates that a storage backend is specified and configured
	/// - Bounds the simulated delays and checks connected marketplaces
	/// - Validates the API server settings if enabled
	fn validate(&self) -> Result<(), ConfigError> {
		// Validate desk config
		if self.desk.id.is_empty() {
			return Err(ConfigError::Validation("Desk ID cannot be empty".into()));
		}

		// Validate storage config
		if self.storage.implementations.is_empty() {
			return Err(ConfigError::Validation(
				"At least one storage implementation must be configured".into(),
			));
		}
		if self.storage.primary.is_empty() {
			return Err(ConfigError::Validation(
				"Storage primary implementation cannot be empty".into(),
			));
		}
		if !self
			.storage
			.implementations
			.contains_key(&self.storage.primary)
		{
			return Err(ConfigError::Validation(format!(
				"Primary storage '{}' not found in implementations",
				self.storage.primary
			)));
		}

		// Validate sync config
		if self.sync.delay_ms > 60_000 {
			return Err(ConfigError::Validation(
				"Sync delay_ms cannot exceed 60000 (1 minute)".into(),
			));
		}
		if self.sync.submit_delay_ms > 60_000 {
			return Err(ConfigError::Validation(
				"Sync submit_delay_ms cannot exceed 60000 (1 minute)".into(),
			));
		}
		for name in &self.sync.connected {
			let marketplace = name.parse::<Marketplace>().map_err(|_| {
				ConfigError::Validation(format!("Unknown connected marketplace '{}'", name))
			})?;
			if marketplace == Marketplace::Manual {
				return Err(ConfigError::Validation(
					"'Manual' is not a marketplace integration and cannot be connected".into(),
				));
			}
		}

		// Validate API config if enabled
		if let Some(ref api) = self.api {
			if api.enabled {
				if api.host.is_empty() {
					return Err(ConfigError::Validation("API host cannot be empty".into()));
				}
				if api.port == 0 {
					return Err(ConfigError::Validation("API port cannot be 0".into()));
				}
			}
		}

		Ok(())
	}

	/// Returns the connected marketplaces as typed values.
	///
	/// Validation guarantees every entry parses, so unknown names are
	/// silently dropped here.
	pub fn connected_marketplaces(&self) -> Vec<Marketplace> {
		self.sync
			.connected
			.iter()
			.filter_map(|name| name.parse().ok())
			.collect()
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// This allows configuration to be parsed from TOML strings using the
/// standard string parsing interface. Environment variables are resolved
/// and the configuration is automatically validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_config() -> String {
		r#"
[desk]
id = "furniture-desk"

[storage]
primary = "memory"
[storage.implementations.memory]

[api]
enabled = true
host = "127.0.0.1"
port = 3000
"#
		.to_string()
	}

	#[test]
	fn test_env_var_resolution() {
		// Set up test environment variables
		std::env::set_var("TEST_HOST", "localhost");
		std::env::set_var("TEST_PORT", "5432");

		let input = "host = \"${TEST_HOST}:${TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "host = \"localhost:5432\"");

		// Clean up
		std::env::remove_var("TEST_HOST");
		std::env::remove_var("TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("MISSING_VAR"));
	}

	#[test]
	fn test_config_with_env_vars() {
		std::env::set_var("TEST_DESK_ID", "test-desk");

		let config_str = r#"
[desk]
id = "${TEST_DESK_ID}"

[storage]
primary = "file"
[storage.implementations.file]
storage_path = "${TEST_STORAGE_PATH:-./data/storage}"
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.desk.id, "test-desk");
		let file_config = &config.storage.implementations["file"];
		assert_eq!(
			file_config.get("storage_path").and_then(|v| v.as_str()),
			Some("./data/storage")
		);

		std::env::remove_var("TEST_DESK_ID");
	}

	#[test]
	fn test_sync_defaults() {
		let config: Config = base_config().parse().unwrap();
		assert_eq!(config.sync.delay_ms, 1500);
		assert_eq!(config.sync.submit_delay_ms, 500);
		assert_eq!(
			config.connected_marketplaces(),
			vec![Marketplace::Amazon, Marketplace::Shopify]
		);
		assert!(config.seed.enabled);
	}

	#[test]
	fn test_unknown_connected_marketplace_rejected() {
		let config_str = r#"
[desk]
id = "test"

[storage]
primary = "memory"
[storage.implementations.memory]

[sync]
connected = ["Amazon", "Etsy"]
"#;

		let result = Config::from_str(config_str);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("Unknown connected marketplace 'Etsy'"));
	}

	#[test]
	fn test_manual_cannot_be_connected() {
		let config_str = r#"
[desk]
id = "test"

[storage]
primary = "memory"
[storage.implementations.memory]

[sync]
connected = ["Manual"]
"#;

		let result = Config::from_str(config_str);
		assert!(result.is_err());
	}

	#[test]
	fn test_primary_storage_must_be_configured() {
		let config_str = r#"
[desk]
id = "test"

[storage]
primary = "file"
[storage.implementations.memory]
"#;

		let result = Config::from_str(config_str);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("Primary storage 'file' not found"));
	}

	#[test]
	fn test_empty_desk_id_rejected() {
		let config_str = r#"
[desk]
id = ""

[storage]
primary = "memory"
[storage.implementations.memory]
"#;

		let result = Config::from_str(config_str);
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("desk.toml");
		std::fs::write(&path, base_config()).unwrap();

		let config = Config::from_file(path.to_str().unwrap()).await.unwrap();
		assert_eq!(config.desk.id, "furniture-desk");
		assert!(config.api.as_ref().map(|api| api.enabled).unwrap_or(false));
	}
}
