//! Integration endpoints.
//!
//! The integrations page lists every marketplace integration with its
//! connection state and lets staff start a sync pass for a connected one.

use crate::server::AppState;
use axum::{
	extract::{Path, State},
	response::Json,
};
use desk_core::SyncError;
use desk_types::{APIError, Marketplace};
use serde::Serialize;

/// One marketplace integration as shown on the integrations page.
#[derive(Debug, Serialize)]
pub struct IntegrationStatus {
	pub name: Marketplace,
	/// Display label, "Connected" or "Not Connected".
	pub status: &'static str,
	pub connected: bool,
	pub syncing: bool,
}

/// Response envelope for the integration list.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
	pub integrations: Vec<IntegrationStatus>,
}

/// Handles GET /api/integrations/status requests.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
	let sync = state.desk.sync();
	let mut integrations = Vec::new();
	for (marketplace, connected) in sync.statuses() {
		integrations.push(IntegrationStatus {
			name: marketplace,
			status: if connected { "Connected" } else { "Not Connected" },
			connected,
			syncing: sync.is_syncing(marketplace).await,
		});
	}
	Json(StatusResponse { integrations })
}

/// Response for a completed sync pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
	pub synced_marketplace: Marketplace,
}

/// Handles POST /api/integrations/{marketplace}/sync requests.
///
/// The response comes back once the pass has run to completion. A client
/// that disconnects early does not stop the pass; the completion marker is
/// written either way.
pub async fn sync(
	State(state): State<AppState>,
	Path(marketplace): Path<String>,
) -> Result<Json<SyncResponse>, APIError> {
	let marketplace = marketplace
		.parse::<Marketplace>()
		.map_err(|()| APIError::BadRequest {
			error_type: "UNKNOWN_MARKETPLACE".to_string(),
			message: format!("Unknown marketplace '{}'", marketplace),
		})?;

	match state.desk.sync().sync(marketplace).await {
		Ok(handle) => {
			if let Err(e) = handle.await {
				tracing::warn!(marketplace = %marketplace, "Sync task failed: {}", e);
				return Err(APIError::InternalServerError {
					error_type: "INTERNAL_ERROR".to_string(),
					message: format!("Sync task failed: {}", e),
				});
			}
			Ok(Json(SyncResponse {
				synced_marketplace: marketplace,
			}))
		}
		Err(e @ SyncError::NotConnected(_)) => Err(APIError::BadRequest {
			error_type: "NOT_CONNECTED".to_string(),
			message: e.to_string(),
		}),
		Err(e @ SyncError::AlreadySyncing(_)) => Err(APIError::Conflict {
			error_type: "SYNC_IN_PROGRESS".to_string(),
			message: e.to_string(),
		}),
	}
}
