//! Main entry point for the order desk service.
//!
//! This binary loads the order collection, wires up the pluggable storage
//! backend and serves the HTTP API the front-end talks to. Components are
//! composed through factory functions, so backends stay swappable from
//! configuration alone.

use clap::Parser;
use desk_config::Config;
use desk_core::{DeskBuilder, DeskFactories, OrderDesk};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

mod apis;
mod server;

/// Command-line arguments for the order desk service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the order desk service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration from file
/// 4. Builds the desk engine and loads the order collection
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	tracing::info!("Started order desk");

	// Load configuration
	let config_path = args
		.config
		.to_str()
		.ok_or("Configuration path is not valid UTF-8")?;
	let config = Config::from_file(config_path).await?;
	tracing::info!("Loaded configuration [{}]", config.desk.id);

	// Build the desk engine and bring the collection into memory
	let desk = Arc::new(build_desk(config.clone())?);
	let orders = desk.init().await;
	tracing::info!(count = orders.len(), "Order collection ready");

	match config.api.filter(|api| api.enabled) {
		Some(api_config) => {
			let api_task = server::start_server(api_config, Arc::clone(&desk));
			tokio::select! {
				result = api_task => {
					tracing::info!("API server finished");
					result?;
				}
				_ = tokio::signal::ctrl_c() => {
					tracing::info!("Received shutdown signal");
				}
			}
		}
		None => {
			tracing::warn!("API server disabled, nothing to serve");
		}
	}

	tracing::info!("Stopped order desk");
	Ok(())
}

/// Builds the desk engine with every registered storage backend.
fn build_desk(config: Config) -> Result<OrderDesk, Box<dyn std::error::Error>> {
	let storage_factories: HashMap<_, _> = desk_storage::get_all_implementations()
		.into_iter()
		.map(|(name, factory)| (name.to_string(), factory))
		.collect();

	let factories = DeskFactories { storage_factories };

	Ok(DeskBuilder::new(config).build(factories)?)
}
