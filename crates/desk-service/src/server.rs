//! HTTP server for the order desk API.
//!
//! This module provides the HTTP surface the front-end talks to: the order
//! collection, the dashboard figures, marketplace integrations and the
//! login session. Handlers live in [`crate::apis`]; this module only wires
//! routing, middleware and startup.

use crate::apis;
use axum::{
	routing::{get, patch, post},
	Router,
};
use desk_config::ApiConfig;
use desk_core::OrderDesk;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the desk engine for processing requests.
	pub desk: Arc<OrderDesk>,
}

/// Builds the router with every /api route attached.
pub fn build_router(state: AppState) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route(
					"/orders",
					get(apis::orders::list).post(apis::orders::create),
				)
				.route("/orders/{id}", get(apis::orders::get_by_id))
				.route("/orders/{id}/extras", patch(apis::orders::update_extras))
				.route("/dashboard", get(apis::dashboard::stats))
				.route("/integrations/status", get(apis::integrations::status))
				.route(
					"/integrations/{marketplace}/sync",
					post(apis::integrations::sync),
				)
				.route(
					"/session",
					post(apis::session::login)
						.get(apis::session::current)
						.delete(apis::session::logout),
				)
				.route("/session/signup", post(apis::session::signup)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for every endpoint.
pub async fn start_server(
	api_config: ApiConfig,
	desk: Arc<OrderDesk>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = build_router(AppState { desk });

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Order desk API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
