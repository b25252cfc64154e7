//! The authoritative order collection.
//!
//! Orders live in memory and every mutation is written through to the
//! storage backend as one JSON document. Storage is a mirror, not the
//! authority: a failed write is logged and the in-memory collection keeps
//! serving reads, so the desk degrades to session-only persistence rather
//! than erroring.

use crate::seed::seed_orders;
use desk_storage::{StorageError, StorageService};
use desk_types::{Order, StorageKey};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// The whole collection is stored under one id.
const COLLECTION_ID: &str = "all";

/// Errors that can occur when mutating the order collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// An order with this id already exists.
	#[error("Order already exists: {0}")]
	DuplicateId(String),
	/// No order with this id exists.
	#[error("Order not found: {0}")]
	NotFound(String),
}

/// Holds the order collection and mirrors it to storage.
pub struct OrderStore {
	storage: Arc<StorageService>,
	orders: RwLock<Vec<Order>>,
	seed_on_empty: bool,
}

impl OrderStore {
	/// Creates an empty store. Call [`OrderStore::load`] before serving.
	pub fn new(storage: Arc<StorageService>, seed_on_empty: bool) -> Self {
		Self {
			storage,
			orders: RwLock::new(Vec::new()),
			seed_on_empty,
		}
	}

	/// Loads the collection from storage, falling back to the starter data.
	///
	/// A missing document seeds the starter orders (when seeding is
	/// enabled); an unreadable one is logged and treated the same way. Every
	/// loaded order gets its delivery note number backfilled, and the
	/// repaired collection is mirrored back to storage.
	pub async fn load(&self) -> Vec<Order> {
		let loaded = match self
			.storage
			.retrieve::<Vec<Order>>(StorageKey::Orders.as_str(), COLLECTION_ID)
			.await
		{
			Ok(orders) => orders,
			Err(StorageError::NotFound) => {
				tracing::info!("No stored orders found, starting from seed data");
				self.starter_orders()
			}
			Err(e) => {
				tracing::error!("Failed to load orders from storage: {}", e);
				self.starter_orders()
			}
		};
		let orders: Vec<Order> = loaded.into_iter().map(backfill_delivery_note).collect();
		if !orders.is_empty() {
			self.persist(&orders).await;
		}
		let mut guard = self.orders.write().await;
		*guard = orders.clone();
		tracing::info!(count = orders.len(), "Order collection loaded");
		orders
	}

	/// Adds a new order to the end of the collection.
	pub async fn add(&self, order: Order) -> Result<Order, StoreError> {
		let mut orders = self.orders.write().await;
		if orders.iter().any(|existing| existing.id == order.id) {
			return Err(StoreError::DuplicateId(order.id));
		}
		let order = backfill_delivery_note(order);
		orders.push(order.clone());
		self.persist(&orders).await;
		tracing::info!(id = %order.id, marketplace = %order.marketplace, "Order added");
		Ok(order)
	}

	/// Replaces the extras notes of one order and returns the updated copy.
	pub async fn update_extras(&self, id: &str, extras: String) -> Result<Order, StoreError> {
		let mut orders = self.orders.write().await;
		let order = orders
			.iter_mut()
			.find(|order| order.id == id)
			.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
		order.extras = extras;
		let updated = order.clone();
		self.persist(&orders).await;
		Ok(updated)
	}

	/// Returns a snapshot of every order, in collection order.
	pub async fn all(&self) -> Vec<Order> {
		self.orders.read().await.clone()
	}

	/// Looks up one order by id.
	pub async fn get(&self, id: &str) -> Option<Order> {
		self.orders
			.read()
			.await
			.iter()
			.find(|order| order.id == id)
			.cloned()
	}

	/// Returns the number of orders held.
	pub async fn count(&self) -> usize {
		self.orders.read().await.len()
	}

	fn starter_orders(&self) -> Vec<Order> {
		if self.seed_on_empty {
			seed_orders()
		} else {
			Vec::new()
		}
	}

	/// Mirrors the collection to storage. Failures are logged, never
	/// surfaced; memory stays authoritative.
	async fn persist(&self, orders: &[Order]) {
		if let Err(e) = self
			.storage
			.store(StorageKey::Orders.as_str(), COLLECTION_ID, &orders)
			.await
		{
			tracing::warn!("Failed to persist orders to storage: {}", e);
		}
	}
}

/// Fills in the derived delivery note number when the stored one is absent
/// or empty.
fn backfill_delivery_note(mut order: Order) -> Order {
	if order
		.delivery_note_number
		.as_deref()
		.map_or(true, |note| note.is_empty())
	{
		order.delivery_note_number = Some(Order::default_delivery_note(&order.id));
	}
	order
}
