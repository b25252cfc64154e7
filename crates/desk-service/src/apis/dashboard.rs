//! Dashboard endpoint.

use crate::server::AppState;
use axum::{extract::State, response::Json};
use desk_core::DashboardStats;

/// Handles GET /api/dashboard requests.
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
	Json(state.desk.dashboard().await)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apis::testing;

	#[tokio::test]
	async fn test_stats_reflect_seeded_collection() {
		let state = testing::state().await;
		let Json(stats) = stats(State(state)).await;
		assert_eq!(stats.pending_sheets, 4);
		assert_eq!(stats.labels_printed, 156);
	}
}
