//! Core engine for the order desk system.
//!
//! This module provides the main orchestration logic for the desk,
//! coordinating the order store, the shared search context, manual order
//! intake, marketplace sync and the login session over one storage
//! backend. It includes the factory pattern for building desk instances
//! from configuration.

use chrono::Utc;
use desk_types::Order;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod builder;
pub mod intake;
pub mod search;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;
pub mod sync;

pub use builder::{BuilderError, DeskBuilder, DeskFactories};
pub use intake::{IntakeError, OrderForm};
pub use search::{OrderView, SearchContext, SearchSurface};
pub use session::{SessionError, SessionService};
pub use stats::{dashboard_stats, DashboardStats};
pub use store::{OrderStore, StoreError};
pub use sync::{SyncError, SyncService};

/// Errors that can occur during desk operations.
#[derive(Debug, Error)]
pub enum DeskError {
	/// A submitted form failed validation.
	#[error(transparent)]
	Intake(#[from] IntakeError),
	/// The order collection rejected a mutation.
	#[error(transparent)]
	Store(#[from] StoreError),
	/// Error from one of the desk services.
	#[error("Service error: {0}")]
	Service(String),
}

/// Main engine holding every service of the order desk.
///
/// The OrderDesk coordinates between its services:
/// - Store: the authoritative order collection, mirrored to storage
/// - Search: the query shared by both search surfaces
/// - Session: the signed-in user
/// - Sync: simulated marketplace passes and their completion marker
pub struct OrderDesk {
	/// The authoritative order collection.
	store: Arc<OrderStore>,
	/// Shared search state.
	search: Arc<SearchContext>,
	/// Login session handling.
	session: Arc<SessionService>,
	/// Marketplace sync passes.
	sync: Arc<SyncService>,
	/// How long a manual submission takes.
	submit_delay: Duration,
}

impl std::fmt::Debug for OrderDesk {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OrderDesk")
			.field("submit_delay", &self.submit_delay)
			.finish_non_exhaustive()
	}
}

impl OrderDesk {
	/// Creates a desk from its services. Most callers should go through
	/// [`DeskBuilder`] instead.
	pub fn new(
		store: Arc<OrderStore>,
		search: Arc<SearchContext>,
		session: Arc<SessionService>,
		sync: Arc<SyncService>,
		submit_delay: Duration,
	) -> Self {
		Self {
			store,
			search,
			session,
			sync,
			submit_delay,
		}
	}

	/// Loads the order collection from storage. Call once before serving.
	pub async fn init(&self) -> Vec<Order> {
		self.store.load().await
	}

	/// Returns the order store.
	pub fn store(&self) -> &Arc<OrderStore> {
		&self.store
	}

	/// Returns the shared search context.
	pub fn search(&self) -> &Arc<SearchContext> {
		&self.search
	}

	/// Returns the session service.
	pub fn session(&self) -> &Arc<SessionService> {
		&self.session
	}

	/// Returns the sync service.
	pub fn sync(&self) -> &Arc<SyncService> {
		&self.sync
	}

	/// Returns the orders a caller should see right now: the collection
	/// filtered by the shared query, then narrowed to the requested view.
	pub async fn orders_view(&self, view: OrderView) -> Vec<Order> {
		let orders = self.store.all().await;
		let query = self.search.query().await;
		let filtered = search::filter_orders(orders, &query);
		search::scope_orders(filtered, view)
	}

	/// Returns the dashboard figures for today.
	pub async fn dashboard(&self) -> DashboardStats {
		let orders = self.store.all().await;
		dashboard_stats(&orders, Utc::now().date_naive())
	}

	/// Takes a submitted add-order form through validation, the submission
	/// delay and the store.
	///
	/// The work runs on its own task, so a caller that gives up early
	/// cannot cancel a submission that has already been accepted. Invalid
	/// forms are rejected before the delay starts.
	pub async fn submit_order(&self, form: OrderForm) -> Result<Order, DeskError> {
		let store = self.store.clone();
		let delay = self.submit_delay;
		let handle = tokio::spawn(async move {
			form.validate()?;
			tokio::time::sleep(delay).await;
			let order = form.into_order(Utc::now().date_naive())?;
			store.add(order).await.map_err(DeskError::from)
		});
		handle
			.await
			.map_err(|e| DeskError::Service(format!("Submission task failed: {}", e)))?
	}
}
