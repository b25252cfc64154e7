//! Builder pattern for constructing the order desk engine.
//!
//! Composes an [`OrderDesk`] from configuration and a set of factory
//! functions, so the storage backend stays pluggable without the core
//! depending on any one implementation.

use crate::store::OrderStore;
use crate::{OrderDesk, SearchContext, SessionService, SyncService};
use desk_config::Config;
use desk_storage::{StorageError, StorageInterface, StorageService};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during engine construction.
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Missing required component: {0}")]
	MissingComponent(String),
}

/// Container for the factory functions needed to build an [`OrderDesk`].
///
/// Each factory takes the TOML table configured for its implementation and
/// returns the corresponding backend.
pub struct DeskFactories<SF> {
	pub storage_factories: HashMap<String, SF>,
}

/// Builder for constructing an [`OrderDesk`] with a pluggable storage
/// backend.
pub struct DeskBuilder {
	config: Config,
}

impl DeskBuilder {
	/// Creates a new DeskBuilder with the given configuration.
	pub fn new(config: Config) -> Self {
		Self { config }
	}

	/// Builds the OrderDesk using the registered storage factories.
	pub fn build<SF>(self, factories: DeskFactories<SF>) -> Result<OrderDesk, BuilderError>
	where
		SF: Fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>,
	{
		let mut storage_impls = HashMap::new();
		for (name, config) in &self.config.storage.implementations {
			if let Some(factory) = factories.storage_factories.get(name) {
				match factory(config) {
					Ok(implementation) => {
						// Validate the configuration using the implementation's schema
						match implementation.config_schema().validate(config) {
							Ok(_) => {
								let is_primary = &self.config.storage.primary == name;
								storage_impls.insert(name.clone(), implementation);
								tracing::info!(component = "storage", implementation = %name, enabled = %is_primary, "Loaded");
							}
							Err(e) => {
								tracing::error!(
									component = "storage",
									implementation = %name,
									error = %e,
									"Invalid configuration for storage implementation"
								);
								return Err(BuilderError::Config(format!(
									"Invalid configuration for storage implementation '{}': {}",
									name, e
								)));
							}
						}
					}
					Err(e) => {
						tracing::error!(
							component = "storage",
							implementation = %name,
							error = %e,
							"Failed to create storage implementation"
						);
						return Err(BuilderError::Config(format!(
							"Failed to create storage implementation '{}': {}",
							name, e
						)));
					}
				}
			}
		}

		let primary_storage = &self.config.storage.primary;
		let storage_backend = storage_impls.remove(primary_storage).ok_or_else(|| {
			BuilderError::MissingComponent(format!(
				"Primary storage '{}' has no registered factory",
				primary_storage
			))
		})?;
		let storage = Arc::new(StorageService::new(storage_backend));

		let store = Arc::new(OrderStore::new(storage.clone(), self.config.seed.enabled));
		let search = Arc::new(SearchContext::new());
		let session = Arc::new(SessionService::new(storage.clone()));
		let sync = Arc::new(SyncService::new(
			storage,
			Duration::from_millis(self.config.sync.delay_ms),
			self.config.connected_marketplaces(),
		));

		Ok(OrderDesk::new(
			store,
			search,
			session,
			sync,
			Duration::from_millis(self.config.sync.submit_delay_ms),
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn factories() -> DeskFactories<desk_storage::StorageFactory> {
		DeskFactories {
			storage_factories: desk_storage::get_all_implementations()
				.into_iter()
				.map(|(name, factory)| (name.to_string(), factory))
				.collect(),
		}
	}

	fn memory_config() -> Config {
		r#"
			[desk]
			id = "test-desk"

			[storage]
			primary = "memory"

			[storage.implementations.memory]
		"#
		.parse()
		.unwrap()
	}

	#[tokio::test]
	async fn test_build_with_memory_storage() {
		let desk = DeskBuilder::new(memory_config())
			.build(factories())
			.unwrap();
		let orders = desk.init().await;
		assert_eq!(orders.len(), 8);
	}

	#[test]
	fn test_build_without_matching_factory() {
		let config: Config = r#"
			[desk]
			id = "test-desk"

			[storage]
			primary = "redis"

			[storage.implementations.redis]
			url = "redis://localhost"
		"#
		.parse()
		.unwrap();
		let err = DeskBuilder::new(config).build(factories()).unwrap_err();
		assert!(matches!(err, BuilderError::MissingComponent(_)));
	}

	#[test]
	fn test_build_rejects_mistyped_implementation_config() {
		let config: Config = r#"
			[desk]
			id = "test-desk"

			[storage]
			primary = "file"

			[storage.implementations.file]
			storage_path = 42
		"#
		.parse()
		.unwrap();
		let err = DeskBuilder::new(config).build(factories()).unwrap_err();
		assert!(matches!(err, BuilderError::Config(message) if message.contains("storage_path")));
	}
}
