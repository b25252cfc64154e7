//! Starter order data.
//!
//! When the storage backend holds no order collection yet (first run, or an
//! unreadable document) the store falls back to this fixed set of eight
//! orders so the desk never comes up empty. Some rows deliberately omit the
//! delivery note number so the load path has something to backfill.

use chrono::NaiveDate;
use desk_types::{Marketplace, Order, OrderStatus, ProductSpec, DEFAULT_PRODUCT_IMAGE};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
	NaiveDate::from_ymd_opt(year, month, day).expect("seed dates should be valid calendar dates")
}

/// Returns the starter order collection.
pub fn seed_orders() -> Vec<Order> {
	vec![
		Order {
			id: "1001".to_string(),
			marketplace: Marketplace::Amazon,
			customer_name: "Jane Cooper".to_string(),
			full_address: "14 Willow Crescent, Headingley, Leeds".to_string(),
			address_line1: "14 Willow Crescent".to_string(),
			address_line2: Some(" Headingley, Leeds".to_string()),
			postcode: "LS6 3AP".to_string(),
			email: Some("jane.cooper@example.com".to_string()),
			phone: Some("+44 7700 900101".to_string()),
			items_count: 1,
			product: ProductSpec {
				model: "Aurora Ottoman Bed".to_string(),
				size: "Double".to_string(),
				colour: "Grey Linen".to_string(),
				storage: "With Storage".to_string(),
				height: "Standard".to_string(),
				quantity: 1,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 4),
			status: OrderStatus::Pending,
			extras: String::new(),
			delivery_note_number: None,
		},
		Order {
			id: "1002".to_string(),
			marketplace: Marketplace::Ebay,
			customer_name: "Ronald Richards".to_string(),
			full_address: "82 Marsh Lane, Erdington, Birmingham".to_string(),
			address_line1: "82 Marsh Lane".to_string(),
			address_line2: Some(" Erdington, Birmingham".to_string()),
			postcode: "B23 6SE".to_string(),
			email: Some("ronald.richards@example.com".to_string()),
			phone: None,
			items_count: 2,
			product: ProductSpec {
				model: "Hartley Divan Bed".to_string(),
				size: "King".to_string(),
				colour: "Steel".to_string(),
				storage: "With Storage".to_string(),
				height: "Low".to_string(),
				quantity: 2,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 6),
			status: OrderStatus::Processing,
			extras: "Headboard fitted on delivery".to_string(),
			delivery_note_number: Some("DN-1002".to_string()),
		},
		Order {
			id: "1003".to_string(),
			marketplace: Marketplace::Shopify,
			customer_name: "Esther Howard".to_string(),
			full_address: "3 Priory Court, Cambridge".to_string(),
			address_line1: "3 Priory Court".to_string(),
			address_line2: Some(" Cambridge".to_string()),
			postcode: "CB1 2AW".to_string(),
			email: None,
			phone: Some("+44 7700 900333".to_string()),
			items_count: 1,
			product: ProductSpec {
				model: "Aurora Ottoman Bed".to_string(),
				size: "Single".to_string(),
				colour: "Oak".to_string(),
				storage: "Without Storage".to_string(),
				height: "Standard".to_string(),
				quantity: 1,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 9),
			status: OrderStatus::Pending,
			extras: String::new(),
			delivery_note_number: None,
		},
		Order {
			id: "1004".to_string(),
			marketplace: Marketplace::Amazon,
			customer_name: "Wade Warren".to_string(),
			full_address: "19 Drummond Way".to_string(),
			address_line1: "19 Drummond Way".to_string(),
			address_line2: None,
			postcode: "G12 0XL".to_string(),
			email: Some("wade.warren@example.com".to_string()),
			phone: None,
			items_count: 1,
			product: ProductSpec {
				model: "Kingsbury Sleigh Bed".to_string(),
				size: "SuperKing".to_string(),
				colour: "Walnut".to_string(),
				storage: "Without Storage".to_string(),
				height: "Tall".to_string(),
				quantity: 1,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 10, 28),
			status: OrderStatus::Completed,
			extras: String::new(),
			delivery_note_number: Some("DN-1004".to_string()),
		},
		Order {
			id: "1005".to_string(),
			marketplace: Marketplace::Manual,
			customer_name: "Leslie Alexander".to_string(),
			full_address: "7 Harbour Street, Whitstable".to_string(),
			address_line1: "7 Harbour Street".to_string(),
			address_line2: Some(" Whitstable".to_string()),
			postcode: "CT5 1AG".to_string(),
			email: None,
			phone: None,
			items_count: 3,
			product: ProductSpec {
				model: "Chilton Bunk Bed".to_string(),
				size: "Single".to_string(),
				colour: "White".to_string(),
				storage: "Without Storage".to_string(),
				height: "Standard".to_string(),
				quantity: 3,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 11),
			status: OrderStatus::Processing,
			extras: "Spare slats included".to_string(),
			delivery_note_number: None,
		},
		Order {
			id: "1006".to_string(),
			marketplace: Marketplace::Ebay,
			customer_name: "Guy Hawkins".to_string(),
			full_address: "240 Fulham Road, Chelsea, London".to_string(),
			address_line1: "240 Fulham Road".to_string(),
			address_line2: Some(" Chelsea, London".to_string()),
			postcode: "SW10 9NB".to_string(),
			email: Some("guy.hawkins@example.com".to_string()),
			phone: Some("+44 7700 900606".to_string()),
			items_count: 1,
			product: ProductSpec {
				model: "Hartley Divan Bed".to_string(),
				size: "Double".to_string(),
				colour: "Charcoal".to_string(),
				storage: "With Storage".to_string(),
				height: "Low".to_string(),
				quantity: 1,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 12),
			status: OrderStatus::Pending,
			extras: String::new(),
			delivery_note_number: None,
		},
		Order {
			id: "1007".to_string(),
			marketplace: Marketplace::Shopify,
			customer_name: "Kristin Watson".to_string(),
			full_address: "55 Corporation Street, Coventry".to_string(),
			address_line1: "55 Corporation Street".to_string(),
			address_line2: Some(" Coventry".to_string()),
			postcode: "CV1 1GF".to_string(),
			email: Some("kristin.watson@example.com".to_string()),
			phone: None,
			items_count: 1,
			product: ProductSpec {
				model: "Aurora Ottoman Bed".to_string(),
				size: "King".to_string(),
				colour: "Grey Linen".to_string(),
				storage: "With Storage".to_string(),
				height: "Standard".to_string(),
				quantity: 1,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 10, 30),
			status: OrderStatus::Cancelled,
			extras: String::new(),
			delivery_note_number: Some("DN-1007".to_string()),
		},
		Order {
			id: "1008".to_string(),
			marketplace: Marketplace::Amazon,
			customer_name: "Cody Fisher".to_string(),
			full_address: "11 Abbey Green, Nuneaton".to_string(),
			address_line1: "11 Abbey Green".to_string(),
			address_line2: Some(" Nuneaton".to_string()),
			postcode: "CV11 5DR".to_string(),
			email: None,
			phone: Some("+44 7700 900888".to_string()),
			items_count: 2,
			product: ProductSpec {
				model: "Kingsbury Sleigh Bed".to_string(),
				size: "Double".to_string(),
				colour: "Oak".to_string(),
				storage: "Without Storage".to_string(),
				height: "Standard".to_string(),
				quantity: 2,
			},
			product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
			date: date(2024, 11, 13),
			status: OrderStatus::Pending,
			extras: String::new(),
			delivery_note_number: None,
		},
	]
}
