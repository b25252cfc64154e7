//! Order domain types for the order desk system.
//!
//! This module defines the customer order record and its associated enums.
//! Field names on the wire follow the browser front-end (camelCase, with
//! the product descriptor nested under the key `"order"`), so a collection
//! persisted by it deserializes cleanly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product sizes offered by the catalogue.
pub const PRODUCT_SIZES: [&str; 4] = ["Single", "Double", "King", "SuperKing"];

/// Storage options offered by the catalogue.
pub const STORAGE_OPTIONS: [&str; 2] = ["With Storage", "Without Storage"];

/// Image used when an order has no product photograph.
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://placehold.co/100x100?text=No+Image";

/// Represents one customer order.
///
/// An order is created from the fixed seed data, from a validated manual
/// submission, or (never) from marketplace sync. It is mutated in place only
/// through its `extras` notes and is never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
	/// Unique business identifier for this order. Not generated internally.
	pub id: String,
	/// Sales channel the order arrived through.
	pub marketplace: Marketplace,
	/// Customer display name.
	pub customer_name: String,
	/// Full shipping address as one line.
	pub full_address: String,
	/// First address line, derived from the full address.
	pub address_line1: String,
	/// Second address line, when the full address carries one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address_line2: Option<String>,
	/// Shipping postcode.
	pub postcode: String,
	/// Customer e-mail, absent for manually entered orders.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Customer phone number, absent for manually entered orders.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Number of physical items in the order.
	pub items_count: u32,
	/// The ordered product's details.
	#[serde(rename = "order")]
	pub product: ProductSpec,
	/// URL of the product image shown on the order sheet.
	pub product_image: String,
	/// Date the order was placed.
	pub date: NaiveDate,
	/// Current fulfilment status.
	pub status: OrderStatus,
	/// Free-text workshop notes, mutable independently of all other fields.
	#[serde(default)]
	pub extras: String,
	/// Delivery note (production sheet) number. Backfilled to `DN-<id>` at
	/// first load when absent, and immutable once set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub delivery_note_number: Option<String>,
}

impl Order {
	/// Returns the derived delivery note number for an order id.
	pub fn default_delivery_note(id: &str) -> String {
		format!("DN-{}", id)
	}
}

/// Details of the product a customer ordered.
///
/// Serialized under the wire key `"order"` inside [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
	/// Product model name, e.g. "Chelsea Ottoman Bed".
	pub model: String,
	/// Bed size, one of [`PRODUCT_SIZES`] for catalogue products.
	pub size: String,
	/// Upholstery colour.
	pub colour: String,
	/// Storage option, one of [`STORAGE_OPTIONS`] for catalogue products.
	pub storage: String,
	/// Base height, free text such as "26cm".
	pub height: String,
	/// Number of units ordered.
	pub quantity: u32,
}

/// Sales channels an order can arrive through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
	/// Entered by staff through the add-order form.
	Manual,
	/// Amazon marketplace.
	Amazon,
	/// eBay marketplace.
	#[serde(rename = "eBay")]
	Ebay,
	/// Shopify storefront.
	Shopify,
}

impl Marketplace {
	/// Returns the display name of the marketplace.
	pub fn as_str(&self) -> &'static str {
		match self {
			Marketplace::Manual => "Manual",
			Marketplace::Amazon => "Amazon",
			Marketplace::Ebay => "eBay",
			Marketplace::Shopify => "Shopify",
		}
	}

	/// Returns an iterator over all Marketplace variants.
	pub fn all() -> impl Iterator<Item = Self> {
		[Self::Manual, Self::Amazon, Self::Ebay, Self::Shopify].into_iter()
	}
}

impl fmt::Display for Marketplace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for Marketplace {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Manual" => Ok(Self::Manual),
			"Amazon" => Ok(Self::Amazon),
			"eBay" => Ok(Self::Ebay),
			"Shopify" => Ok(Self::Shopify),
			_ => Err(()),
		}
	}
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
	/// Waiting for its production sheet.
	Pending,
	/// In the workshop.
	Processing,
	/// Built and dispatched.
	Completed,
	/// Cancelled by the customer or the marketplace.
	Cancelled,
}

impl OrderStatus {
	/// Returns the display name of the status.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderStatus::Pending => "Pending",
			OrderStatus::Processing => "Processing",
			OrderStatus::Completed => "Completed",
			OrderStatus::Cancelled => "Cancelled",
		}
	}
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for OrderStatus {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"Pending" => Ok(Self::Pending),
			"Processing" => Ok(Self::Processing),
			"Completed" => Ok(Self::Completed),
			"Cancelled" => Ok(Self::Cancelled),
			_ => Err(()),
		}
	}
}
