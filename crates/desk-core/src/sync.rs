//! Simulated marketplace synchronization.
//!
//! A sync pass does no real marketplace work yet. It runs for a fixed
//! delay on its own task, then records which marketplace finished as a
//! one-shot marker in storage. The orders page takes the marker exactly
//! once to show its "synced" banner. A pass that has started always runs
//! to completion; callers can await the returned handle but dropping it
//! cancels nothing.

use desk_storage::{StorageError, StorageService};
use desk_types::{Marketplace, StorageKey};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const LAST_SYNCED_ID: &str = "last_marketplace";

/// Errors that can occur when starting a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
	/// The marketplace has no connected integration.
	#[error("Marketplace is not connected: {0}")]
	NotConnected(Marketplace),
	/// A pass for this marketplace is still running.
	#[error("Sync already running for marketplace: {0}")]
	AlreadySyncing(Marketplace),
}

/// Runs simulated sync passes and hands out the completion marker.
pub struct SyncService {
	storage: Arc<StorageService>,
	delay: Duration,
	connected: Vec<Marketplace>,
	active: Arc<Mutex<HashSet<Marketplace>>>,
}

impl SyncService {
	/// Creates a sync service for the given connected marketplaces.
	pub fn new(storage: Arc<StorageService>, delay: Duration, connected: Vec<Marketplace>) -> Self {
		Self {
			storage,
			delay,
			connected,
			active: Arc::new(Mutex::new(HashSet::new())),
		}
	}

	/// Returns whether a marketplace has a connected integration.
	///
	/// Manual is the add-order form, not an integration, so it is never
	/// connected.
	pub fn is_connected(&self, marketplace: Marketplace) -> bool {
		marketplace != Marketplace::Manual && self.connected.contains(&marketplace)
	}

	/// Returns every integration with its connected flag.
	pub fn statuses(&self) -> Vec<(Marketplace, bool)> {
		Marketplace::all()
			.filter(|marketplace| *marketplace != Marketplace::Manual)
			.map(|marketplace| (marketplace, self.is_connected(marketplace)))
			.collect()
	}

	/// Returns whether a pass for this marketplace is currently running.
	pub async fn is_syncing(&self, marketplace: Marketplace) -> bool {
		self.active.lock().await.contains(&marketplace)
	}

	/// Starts a sync pass for one marketplace.
	///
	/// At most one pass per marketplace runs at a time. The pass sleeps for
	/// the configured delay, writes the completion marker and clears its
	/// running flag. Marker write failures are logged and swallowed so the
	/// pass still counts as complete.
	pub async fn sync(&self, marketplace: Marketplace) -> Result<JoinHandle<()>, SyncError> {
		if !self.is_connected(marketplace) {
			return Err(SyncError::NotConnected(marketplace));
		}
		{
			let mut active = self.active.lock().await;
			if !active.insert(marketplace) {
				return Err(SyncError::AlreadySyncing(marketplace));
			}
		}
		tracing::info!(marketplace = %marketplace, "Marketplace sync started");

		let storage = self.storage.clone();
		let active = self.active.clone();
		let delay = self.delay;
		Ok(tokio::spawn(async move {
			tokio::time::sleep(delay).await;
			if let Err(e) = storage
				.store(StorageKey::Sync.as_str(), LAST_SYNCED_ID, &marketplace)
				.await
			{
				tracing::warn!(marketplace = %marketplace, "Failed to record completed sync: {}", e);
			}
			active.lock().await.remove(&marketplace);
			tracing::info!(marketplace = %marketplace, "Marketplace sync completed");
		}))
	}

	/// Takes the one-shot marker left by the most recent completed pass.
	///
	/// The marker is deleted by the read, so only the first caller sees it.
	/// An unreadable marker is logged, consumed and reported as absent.
	pub async fn take_last_synced(&self) -> Option<Marketplace> {
		match self
			.storage
			.take::<Marketplace>(StorageKey::Sync.as_str(), LAST_SYNCED_ID)
			.await
		{
			Ok(marketplace) => Some(marketplace),
			Err(StorageError::NotFound) => None,
			Err(e) => {
				tracing::warn!("Failed to read last synced marketplace: {}", e);
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use desk_storage::implementations::memory::MemoryStorage;

	fn service(connected: Vec<Marketplace>) -> SyncService {
		let storage = Arc::new(StorageService::new(Box::new(MemoryStorage::new())));
		SyncService::new(storage, Duration::from_millis(1500), connected)
	}

	#[tokio::test(start_paused = true)]
	async fn test_sync_leaves_one_shot_marker() {
		let service = service(vec![Marketplace::Amazon, Marketplace::Shopify]);
		let handle = service.sync(Marketplace::Amazon).await.unwrap();
		handle.await.unwrap();

		assert_eq!(
			service.take_last_synced().await,
			Some(Marketplace::Amazon)
		);
		// The first read consumed the marker.
		assert_eq!(service.take_last_synced().await, None);
	}

	#[tokio::test]
	async fn test_sync_rejects_unconnected_marketplace() {
		let service = service(vec![Marketplace::Amazon]);
		assert_eq!(
			service.sync(Marketplace::Ebay).await.unwrap_err(),
			SyncError::NotConnected(Marketplace::Ebay)
		);
		assert_eq!(
			service.sync(Marketplace::Manual).await.unwrap_err(),
			SyncError::NotConnected(Marketplace::Manual)
		);
	}

	#[tokio::test(start_paused = true)]
	async fn test_concurrent_pass_for_same_marketplace_rejected() {
		let service = service(vec![Marketplace::Amazon]);
		let handle = service.sync(Marketplace::Amazon).await.unwrap();
		assert!(service.is_syncing(Marketplace::Amazon).await);
		assert_eq!(
			service.sync(Marketplace::Amazon).await.unwrap_err(),
			SyncError::AlreadySyncing(Marketplace::Amazon)
		);

		handle.await.unwrap();
		assert!(!service.is_syncing(Marketplace::Amazon).await);
		// A finished pass frees the slot.
		let again = service.sync(Marketplace::Amazon).await.unwrap();
		again.await.unwrap();
	}

	#[tokio::test(start_paused = true)]
	async fn test_marker_holds_last_completed_pass() {
		let service = service(vec![Marketplace::Amazon, Marketplace::Shopify]);
		service.sync(Marketplace::Amazon).await.unwrap().await.unwrap();
		service.sync(Marketplace::Shopify).await.unwrap().await.unwrap();

		assert_eq!(
			service.take_last_synced().await,
			Some(Marketplace::Shopify)
		);
	}

	#[test]
	fn test_statuses_cover_every_integration() {
		let service = service(vec![Marketplace::Amazon, Marketplace::Shopify]);
		let statuses = service.statuses();
		assert_eq!(
			statuses,
			vec![
				(Marketplace::Amazon, true),
				(Marketplace::Ebay, false),
				(Marketplace::Shopify, true),
			]
		);
	}
}
