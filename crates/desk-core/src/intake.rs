//! Manual order intake.
//!
//! The add-order form collects six free-text fields. Validation checks every
//! field and reports all failures at once, keyed by wire field name, so the
//! form can mark each box individually. A form that passes validation is
//! turned into a full [`Order`] with the same shape as a seeded one.

use chrono::NaiveDate;
use desk_types::{Marketplace, Order, OrderStatus, ProductSpec, DEFAULT_PRODUCT_IMAGE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during order intake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
	/// One or more form fields failed validation. The map is keyed by wire
	/// field name and holds one message per failed field.
	#[error("Order form failed validation")]
	Invalid(BTreeMap<String, String>),
}

/// The raw add-order form, exactly as submitted.
///
/// Every field arrives as text; nothing is parsed until validation. Missing
/// fields deserialize as empty strings so they fail validation rather than
/// rejection at the decoding layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderForm {
	/// Customer name.
	pub order_name: String,
	/// Business identifier for the new order.
	pub order_id: String,
	/// Sales channel name, "Manual" for orders typed in by staff.
	pub marketplace: String,
	/// Shipping postcode.
	pub postcode: String,
	/// Free-text description, reused as the address and the product model.
	pub order_description: String,
	/// Number of units, as typed.
	pub quantity: String,
}

impl OrderForm {
	/// Checks every field and collects the failures.
	///
	/// All checks run independently, so a form with several problems gets
	/// one message per field rather than the first failure only.
	pub fn validate(&self) -> Result<(), IntakeError> {
		let mut errors = BTreeMap::new();
		if self.order_name.trim().is_empty() {
			errors.insert(
				"orderName".to_string(),
				"Order Name is required".to_string(),
			);
		}
		if self.order_id.trim().is_empty() {
			errors.insert("orderId".to_string(), "Order ID is required".to_string());
		}
		if self.order_description.trim().is_empty() {
			errors.insert(
				"orderDescription".to_string(),
				"Order Description is required".to_string(),
			);
		}
		if self.quantity.trim().is_empty() {
			errors.insert("quantity".to_string(), "Quantity is required".to_string());
		} else if !parses_positive(&self.quantity) {
			errors.insert(
				"quantity".to_string(),
				"Quantity must be a positive number".to_string(),
			);
		}
		if self.marketplace.trim().is_empty() {
			errors.insert(
				"marketplace".to_string(),
				"Marketplace is required".to_string(),
			);
		} else if self.marketplace.parse::<Marketplace>().is_err() {
			errors.insert(
				"marketplace".to_string(),
				format!("Unknown marketplace '{}'", self.marketplace),
			);
		}
		if self.postcode.trim().is_empty() {
			errors.insert("postcode".to_string(), "Postcode is required".to_string());
		}
		if errors.is_empty() {
			Ok(())
		} else {
			Err(IntakeError::Invalid(errors))
		}
	}

	/// Builds the order for a submission, validating first.
	///
	/// The description doubles as the shipping address (split at its first
	/// comma) and as the product model; the product spec fields the form
	/// does not ask for are filled with "Standard". The new order starts
	/// Pending with its delivery note number already assigned.
	pub fn into_order(self, date: NaiveDate) -> Result<Order, IntakeError> {
		self.validate()?;
		// Both parses were checked by validate above.
		let marketplace = self
			.marketplace
			.parse::<Marketplace>()
			.unwrap_or(Marketplace::Manual);
		let quantity = self.quantity.trim().parse::<u32>().unwrap_or(1);
		let (address_line1, address_line2) = split_address(&self.order_description);
		let delivery_note_number = Some(Order::default_delivery_note(&self.order_id));
		Ok(Order {
			id: self.order_id,
			marketplace,
			customer_name: self.order_name,
			full_address: self.order_description.clone(),
			address_line1,
			address_line2,
			postcode: self.postcode,
			email: None,
			phone: None,
			items_count: quantity,
			product: ProductSpec {
				model: self.order_description,
				size: "Standard".to_string(),
				colour: "Standard".to_string(),
				storage: "Standard".to_string(),
				height: "Standard".to_string(),
				quantity,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date,
			status: OrderStatus::Pending,
			extras: String::new(),
			delivery_note_number,
		})
	}
}

fn parses_positive(raw: &str) -> bool {
	matches!(raw.trim().parse::<u32>(), Ok(n) if n > 0)
}

/// Splits a description into address lines at its first comma.
///
/// Segments keep their whitespace. A description with no comma, or nothing
/// before the first one, becomes line one on its own.
fn split_address(description: &str) -> (String, Option<String>) {
	match description.split_once(',') {
		Some(("", _)) | None => (description.to_string(), None),
		Some((line1, rest)) => (line1.to_string(), Some(rest.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_form() -> OrderForm {
		OrderForm {
			order_name: "Darlene Robertson".to_string(),
			order_id: "2001".to_string(),
			marketplace: "Manual".to_string(),
			postcode: "BD1 5QT".to_string(),
			order_description: "48 Thornton Road, Bradford".to_string(),
			quantity: "2".to_string(),
		}
	}

	fn errors(form: &OrderForm) -> BTreeMap<String, String> {
		match form.validate() {
			Err(IntakeError::Invalid(errors)) => errors,
			Ok(()) => BTreeMap::new(),
		}
	}

	#[test]
	fn test_valid_form_builds_pending_order() {
		let date = NaiveDate::from_ymd_opt(2024, 11, 18).unwrap();
		let order = valid_form().into_order(date).unwrap();
		assert_eq!(order.id, "2001");
		assert_eq!(order.customer_name, "Darlene Robertson");
		assert_eq!(order.marketplace, Marketplace::Manual);
		assert_eq!(order.status, OrderStatus::Pending);
		assert_eq!(order.delivery_note_number.as_deref(), Some("DN-2001"));
		assert_eq!(order.full_address, "48 Thornton Road, Bradford");
		assert_eq!(order.address_line1, "48 Thornton Road");
		assert_eq!(order.address_line2.as_deref(), Some(" Bradford"));
		assert_eq!(order.items_count, 2);
		assert_eq!(order.product.quantity, 2);
		assert_eq!(order.product.model, "48 Thornton Road, Bradford");
		assert_eq!(order.product.size, "Standard");
		assert_eq!(order.email, None);
		assert_eq!(order.extras, "");
		assert_eq!(order.date, date);
	}

	#[test]
	fn test_empty_form_reports_every_field() {
		let errors = errors(&OrderForm::default());
		assert_eq!(errors.len(), 6);
		assert_eq!(errors["orderName"], "Order Name is required");
		assert_eq!(errors["orderId"], "Order ID is required");
		assert_eq!(errors["orderDescription"], "Order Description is required");
		assert_eq!(errors["quantity"], "Quantity is required");
		assert_eq!(errors["marketplace"], "Marketplace is required");
		assert_eq!(errors["postcode"], "Postcode is required");
	}

	#[test]
	fn test_quantity_and_postcode_fail_independently() {
		let form = OrderForm {
			postcode: String::new(),
			quantity: "0".to_string(),
			..valid_form()
		};
		let errors = errors(&form);
		assert_eq!(errors["postcode"], "Postcode is required");
		assert_eq!(errors["quantity"], "Quantity must be a positive number");
	}

	#[test]
	fn test_quantity_messages() {
		for raw in ["abc", "-2", "0", "1.5"] {
			let form = OrderForm {
				quantity: raw.to_string(),
				..valid_form()
			};
			assert_eq!(
				errors(&form)["quantity"],
				"Quantity must be a positive number",
				"quantity {:?}",
				raw
			);
		}
		let form = OrderForm {
			quantity: " 3 ".to_string(),
			..valid_form()
		};
		assert!(form.validate().is_ok());
	}

	#[test]
	fn test_unknown_marketplace_rejected() {
		let form = OrderForm {
			marketplace: "Etsy".to_string(),
			..valid_form()
		};
		assert_eq!(errors(&form)["marketplace"], "Unknown marketplace 'Etsy'");
	}

	#[test]
	fn test_description_without_comma_is_one_line() {
		let form = OrderForm {
			order_description: "Suite 9 Victoria Mills".to_string(),
			..valid_form()
		};
		let order = form.into_order(NaiveDate::from_ymd_opt(2024, 11, 18).unwrap()).unwrap();
		assert_eq!(order.address_line1, "Suite 9 Victoria Mills");
		assert_eq!(order.address_line2, None);
	}

	#[test]
	fn test_description_splits_at_first_comma_only() {
		let form = OrderForm {
			order_description: "1 King Street, Salford, Manchester".to_string(),
			..valid_form()
		};
		let order = form.into_order(NaiveDate::from_ymd_opt(2024, 11, 18).unwrap()).unwrap();
		assert_eq!(order.address_line1, "1 King Street");
		assert_eq!(order.address_line2.as_deref(), Some(" Salford, Manchester"));
	}

	#[test]
	fn test_validation_errors_skip_construction() {
		let form = OrderForm {
			order_id: String::new(),
			..valid_form()
		};
		let err = form
			.into_order(NaiveDate::from_ymd_opt(2024, 11, 18).unwrap())
			.unwrap_err();
		let IntakeError::Invalid(errors) = err;
		assert_eq!(errors.len(), 1);
		assert!(errors.contains_key("orderId"));
	}
}
