//! Order search and view scoping.
//!
//! One query string is shared by the two places a query can be typed: the
//! application-wide header box and the box on the orders page. Whichever
//! surface wrote last owns the string and both read the same value back, so
//! the surfaces can never disagree about what is being searched for.
//!
//! Matching is a case-insensitive substring test over every displayed field
//! of an order. The standing views (all orders, pending sheets) are applied
//! after the query, so a view never widens a search result.

use desk_types::{Order, OrderStatus};
use std::str::FromStr;
use tokio::sync::RwLock;

/// Where a search query was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSurface {
	/// The search box on the orders page.
	Local,
	/// The application-wide search box in the header.
	Global,
}

impl SearchSurface {
	/// Returns the lower-case name used in logs and request parameters.
	pub fn as_str(&self) -> &'static str {
		match self {
			SearchSurface::Local => "local",
			SearchSurface::Global => "global",
		}
	}
}

impl FromStr for SearchSurface {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"local" => Ok(Self::Local),
			"global" => Ok(Self::Global),
			_ => Err(()),
		}
	}
}

/// Which standing subset of the collection a caller is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderView {
	/// Every order.
	#[default]
	All,
	/// Orders still waiting for their production sheet.
	PendingSheets,
}

impl FromStr for OrderView {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all" => Ok(Self::All),
			"pending" => Ok(Self::PendingSheets),
			_ => Err(()),
		}
	}
}

/// The shared search query.
///
/// Writes are last-writer-wins regardless of surface; the surface is kept
/// only for the logs.
pub struct SearchContext {
	query: RwLock<String>,
}

impl SearchContext {
	/// Creates a context with an empty query.
	pub fn new() -> Self {
		Self {
			query: RwLock::new(String::new()),
		}
	}

	/// Replaces the shared query with whatever was typed last.
	pub async fn set_query(&self, surface: SearchSurface, query: impl Into<String>) {
		let query = query.into();
		tracing::debug!(surface = surface.as_str(), query = %query, "Search query updated");
		*self.query.write().await = query;
	}

	/// Clears the shared query for every surface at once.
	pub async fn clear(&self, surface: SearchSurface) {
		self.set_query(surface, String::new()).await;
	}

	/// Returns the current query exactly as it was typed.
	pub async fn query(&self) -> String {
		self.query.read().await.clone()
	}
}

impl Default for SearchContext {
	fn default() -> Self {
		Self::new()
	}
}

/// Filters an order snapshot by a query string.
///
/// A query that is blank after trimming leaves the snapshot untouched. Any
/// other query is matched verbatim (untrimmed, case-insensitively) as a
/// substring of any searchable field, and the snapshot keeps its order.
pub fn filter_orders(orders: Vec<Order>, query: &str) -> Vec<Order> {
	if query.trim().is_empty() {
		return orders;
	}
	let needle = query.to_lowercase();
	orders
		.into_iter()
		.filter(|order| matches_query(order, &needle))
		.collect()
}

/// Narrows an order snapshot to a standing view.
pub fn scope_orders(orders: Vec<Order>, view: OrderView) -> Vec<Order> {
	match view {
		OrderView::All => orders,
		OrderView::PendingSheets => orders
			.into_iter()
			.filter(|order| order.status == OrderStatus::Pending)
			.collect(),
	}
}

fn matches_query(order: &Order, needle: &str) -> bool {
	searchable_fields(order)
		.iter()
		.any(|field| field.to_lowercase().contains(needle))
}

/// Collects the searchable field values of an order.
///
/// Absent and empty fields are skipped, so they can never match.
fn searchable_fields(order: &Order) -> Vec<&str> {
	let candidates = [
		Some(order.id.as_str()),
		Some(order.customer_name.as_str()),
		order.delivery_note_number.as_deref(),
		Some(order.marketplace.as_str()),
		Some(order.full_address.as_str()),
		Some(order.address_line1.as_str()),
		order.address_line2.as_deref(),
		Some(order.postcode.as_str()),
		order.email.as_deref(),
		order.phone.as_deref(),
		Some(order.status.as_str()),
		Some(order.extras.as_str()),
		Some(order.product.model.as_str()),
		Some(order.product.size.as_str()),
		Some(order.product.colour.as_str()),
		Some(order.product.storage.as_str()),
		Some(order.product.height.as_str()),
	];
	candidates
		.into_iter()
		.flatten()
		.filter(|field| !field.is_empty())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::seed::seed_orders;

	fn named_ids(orders: &[Order]) -> Vec<&str> {
		orders.iter().map(|order| order.id.as_str()).collect()
	}

	#[test]
	fn test_blank_query_returns_everything() {
		let orders = seed_orders();
		assert_eq!(filter_orders(orders.clone(), "").len(), orders.len());
		assert_eq!(filter_orders(orders.clone(), "   ").len(), orders.len());
		assert_eq!(filter_orders(orders.clone(), "\t\n").len(), orders.len());
	}

	#[test]
	fn test_search_is_case_insensitive() {
		let orders = seed_orders();
		let hits = filter_orders(orders, "JANE");
		assert_eq!(named_ids(&hits), vec!["1001"]);
	}

	#[test]
	fn test_search_covers_product_and_note_fields() {
		let orders = seed_orders();
		let by_colour = filter_orders(orders.clone(), "walnut");
		assert_eq!(named_ids(&by_colour), vec!["1004"]);
		let by_note = filter_orders(orders.clone(), "dn-1002");
		assert_eq!(named_ids(&by_note), vec!["1002"]);
		let by_extras = filter_orders(orders, "spare slats");
		assert_eq!(named_ids(&by_extras), vec!["1005"]);
	}

	#[test]
	fn test_filter_keeps_collection_order() {
		let orders = seed_orders();
		let hits = filter_orders(orders, "amazon");
		assert_eq!(named_ids(&hits), vec!["1001", "1004", "1008"]);
	}

	#[test]
	fn test_filter_is_idempotent() {
		let orders = seed_orders();
		let once = filter_orders(orders, "bed");
		let twice = filter_orders(once.clone(), "bed");
		assert_eq!(once, twice);
	}

	#[test]
	fn test_untrimmed_query_matches_verbatim() {
		let orders = seed_orders();
		// "jane cooper" contains " cooper" but not "cooper " (nothing
		// follows the final word), so surrounding whitespace is significant.
		assert_eq!(filter_orders(orders.clone(), " cooper").len(), 1);
		assert_eq!(filter_orders(orders, "cooper ").len(), 0);
	}

	#[test]
	fn test_pending_view_narrows_after_search() {
		let orders = seed_orders();
		let hits = filter_orders(orders, "bed");
		let scoped = scope_orders(hits.clone(), OrderView::PendingSheets);
		assert!(scoped.len() < hits.len());
		assert!(scoped
			.iter()
			.all(|order| order.status == OrderStatus::Pending));
	}

	#[tokio::test]
	async fn test_surfaces_share_one_query() {
		let context = SearchContext::new();
		context.set_query(SearchSurface::Global, "oak").await;
		assert_eq!(context.query().await, "oak");
		context.set_query(SearchSurface::Local, "walnut").await;
		assert_eq!(context.query().await, "walnut");
		context.clear(SearchSurface::Global).await;
		assert_eq!(context.query().await, "");
	}
}
