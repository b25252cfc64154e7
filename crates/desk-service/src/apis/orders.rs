//! Order endpoints.
//!
//! List, fetch, create and annotate orders. Listing also owns the shared
//! search query: a request carrying `q` rewrites it for both surfaces, and
//! the response hands over the one-shot synced-marketplace marker when a
//! sync pass finished since the last listing.

use crate::server::AppState;
use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
};
use desk_core::{DeskError, IntakeError, OrderForm, OrderView, SearchSurface, StoreError};
use desk_types::{APIError, Marketplace, Order};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the order list.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
	/// Replacement search query. Absent leaves the shared query untouched.
	pub q: Option<String>,
	/// Which surface typed the query ("local" or "global").
	pub surface: Option<String>,
	/// Standing view to narrow to ("all" or "pending").
	pub view: Option<String>,
}

/// Response envelope for the order list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
	pub orders: Vec<Order>,
	/// The shared query after this request.
	pub query: String,
	/// Present exactly once after a sync pass completes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub synced_marketplace: Option<Marketplace>,
}

/// Handles GET /api/orders requests.
pub async fn list(
	State(state): State<AppState>,
	Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, APIError> {
	let view = parse_view(params.view.as_deref())?;
	let surface = parse_surface(params.surface.as_deref())?;

	if let Some(q) = params.q {
		state.desk.search().set_query(surface, q).await;
	}

	let synced_marketplace = state.desk.sync().take_last_synced().await;
	let orders = state.desk.orders_view(view).await;
	let query = state.desk.search().query().await;

	Ok(Json(ListResponse {
		orders,
		query,
		synced_marketplace,
	}))
}

/// Handles GET /api/orders/{id} requests.
pub async fn get_by_id(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<Order>, APIError> {
	match state.desk.store().get(&id).await {
		Some(order) => Ok(Json(order)),
		None => Err(order_not_found(&id)),
	}
}

/// Handles POST /api/orders requests.
///
/// Takes the submission through validation and the simulated delay; the
/// work is not cancelled if the client goes away.
pub async fn create(
	State(state): State<AppState>,
	Json(form): Json<OrderForm>,
) -> Result<(StatusCode, Json<Order>), APIError> {
	match state.desk.submit_order(form).await {
		Ok(order) => Ok((StatusCode::CREATED, Json(order))),
		Err(e) => {
			tracing::warn!("Order submission failed: {}", e);
			Err(desk_error(e))
		}
	}
}

/// Body for PATCH /api/orders/{id}/extras.
#[derive(Debug, Deserialize)]
pub struct ExtrasBody {
	pub extras: String,
}

/// Handles PATCH /api/orders/{id}/extras requests.
pub async fn update_extras(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(body): Json<ExtrasBody>,
) -> Result<Json<Order>, APIError> {
	match state.desk.store().update_extras(&id, body.extras).await {
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!("Extras update failed: {}", e);
			Err(desk_error(e.into()))
		}
	}
}

fn parse_view(raw: Option<&str>) -> Result<OrderView, APIError> {
	match raw {
		None => Ok(OrderView::All),
		Some(raw) => raw.parse().map_err(|()| APIError::BadRequest {
			error_type: "INVALID_VIEW".to_string(),
			message: format!("Unknown view '{}', expected 'all' or 'pending'", raw),
		}),
	}
}

fn parse_surface(raw: Option<&str>) -> Result<SearchSurface, APIError> {
	match raw {
		None => Ok(SearchSurface::Local),
		Some(raw) => raw.parse().map_err(|()| APIError::BadRequest {
			error_type: "INVALID_SURFACE".to_string(),
			message: format!("Unknown surface '{}', expected 'local' or 'global'", raw),
		}),
	}
}

fn order_not_found(id: &str) -> APIError {
	APIError::NotFound {
		error_type: "ORDER_NOT_FOUND".to_string(),
		message: format!("Order not found: {}", id),
	}
}

/// Maps engine errors onto the API error envelope.
fn desk_error(e: DeskError) -> APIError {
	match e {
		DeskError::Intake(IntakeError::Invalid(errors)) => APIError::UnprocessableEntity {
			error_type: "VALIDATION_FAILED".to_string(),
			message: "Order form failed validation".to_string(),
			details: serde_json::to_value(&errors).ok(),
		},
		DeskError::Store(StoreError::DuplicateId(id)) => APIError::Conflict {
			error_type: "DUPLICATE_ORDER_ID".to_string(),
			message: format!("Order already exists: {}", id),
		},
		DeskError::Store(StoreError::NotFound(id)) => order_not_found(&id),
		DeskError::Service(message) => APIError::InternalServerError {
			error_type: "INTERNAL_ERROR".to_string(),
			message,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::apis::testing;
	use desk_types::OrderStatus;

	fn params(q: Option<&str>, surface: Option<&str>, view: Option<&str>) -> Query<ListParams> {
		Query(ListParams {
			q: q.map(str::to_string),
			surface: surface.map(str::to_string),
			view: view.map(str::to_string),
		})
	}

	fn valid_form(id: &str) -> OrderForm {
		OrderForm {
			order_name: "Theresa Webb".to_string(),
			order_id: id.to_string(),
			marketplace: "Manual".to_string(),
			postcode: "YO1 7HH".to_string(),
			order_description: "5 Stonegate, York".to_string(),
			quantity: "1".to_string(),
		}
	}

	#[tokio::test]
	async fn test_list_returns_seeded_collection() {
		let state = testing::state().await;
		let Json(response) = list(State(state), params(None, None, None))
			.await
			.unwrap();
		assert_eq!(response.orders.len(), 8);
		assert_eq!(response.query, "");
		assert!(response.synced_marketplace.is_none());
	}

	#[tokio::test]
	async fn test_list_query_sticks_until_cleared() {
		let state = testing::state().await;
		let Json(filtered) = list(
			State(state.clone()),
			params(Some("jane"), Some("global"), None),
		)
		.await
		.unwrap();
		assert_eq!(filtered.orders.len(), 1);
		assert_eq!(filtered.query, "jane");

		// A request without q keeps the shared query.
		let Json(kept) = list(State(state.clone()), params(None, None, None))
			.await
			.unwrap();
		assert_eq!(kept.orders.len(), 1);
		assert_eq!(kept.query, "jane");

		// An empty q clears it for both surfaces.
		let Json(cleared) = list(State(state), params(Some(""), Some("local"), None))
			.await
			.unwrap();
		assert_eq!(cleared.orders.len(), 8);
		assert_eq!(cleared.query, "");
	}

	#[tokio::test]
	async fn test_list_pending_view_composes_with_query() {
		let state = testing::state().await;
		let Json(response) = list(
			State(state),
			params(Some("amazon"), None, Some("pending")),
		)
		.await
		.unwrap();
		assert!(!response.orders.is_empty());
		assert!(response
			.orders
			.iter()
			.all(|order| order.status == OrderStatus::Pending
				&& order.marketplace == Marketplace::Amazon));
	}

	#[tokio::test]
	async fn test_list_rejects_unknown_view() {
		let state = testing::state().await;
		let err = list(State(state), params(None, None, Some("archived")))
			.await
			.unwrap_err();
		assert_eq!(err.status_code(), 400);
	}

	#[tokio::test(start_paused = true)]
	async fn test_list_hands_over_sync_marker_once() {
		let state = testing::state().await;
		state
			.desk
			.sync()
			.sync(Marketplace::Amazon)
			.await
			.unwrap()
			.await
			.unwrap();

		let Json(first) = list(State(state.clone()), params(None, None, None))
			.await
			.unwrap();
		assert_eq!(first.synced_marketplace, Some(Marketplace::Amazon));

		let Json(second) = list(State(state), params(None, None, None))
			.await
			.unwrap();
		assert_eq!(second.synced_marketplace, None);
	}

	#[tokio::test]
	async fn test_get_by_id_misses_with_404() {
		let state = testing::state().await;
		let Json(order) = get_by_id(State(state.clone()), Path("1003".to_string()))
			.await
			.unwrap();
		assert_eq!(order.customer_name, "Esther Howard");

		let err = get_by_id(State(state), Path("9999".to_string()))
			.await
			.unwrap_err();
		assert_eq!(err.status_code(), 404);
	}

	#[tokio::test(start_paused = true)]
	async fn test_create_and_conflict() {
		let state = testing::state().await;
		let (status, Json(order)) = create(State(state.clone()), Json(valid_form("2001")))
			.await
			.unwrap();
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(order.delivery_note_number.as_deref(), Some("DN-2001"));

		let err = create(State(state), Json(valid_form("2001")))
			.await
			.unwrap_err();
		assert_eq!(err.status_code(), 409);
	}

	#[tokio::test]
	async fn test_create_reports_validation_map() {
		let state = testing::state().await;
		let err = create(State(state), Json(OrderForm::default()))
			.await
			.unwrap_err();
		assert_eq!(err.status_code(), 422);
		let body = err.to_error_response();
		let details = body.details.expect("validation map is attached");
		assert_eq!(details["orderName"], "Order Name is required");
		assert_eq!(details["quantity"], "Quantity is required");
	}

	#[tokio::test]
	async fn test_update_extras_round_trip() {
		let state = testing::state().await;
		let Json(updated) = update_extras(
			State(state.clone()),
			Path("1001".to_string()),
			Json(ExtrasBody {
				extras: "Ring doorbell twice".to_string(),
			}),
		)
		.await
		.unwrap();
		assert_eq!(updated.extras, "Ring doorbell twice");

		let err = update_extras(
			State(state),
			Path("9999".to_string()),
			Json(ExtrasBody {
				extras: String::new(),
			}),
		)
		.await
		.unwrap_err();
		assert_eq!(err.status_code(), 404);
	}
}
