//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::{LineItem, ProductId};

/// Catalog product as listed by the storefront.
///
/// `available_qty` is warehouse inventory. It is never copied into a line
/// item's quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub product_name: String,

    /// Brand name
    #[serde(default)]
    pub brand_name: String,

    /// Category instance name
    #[serde(rename = "catInstanceName", default)]
    pub category_name: String,

    /// Product description
    #[serde(default)]
    pub product_description: String,

    /// Currency symbol
    pub currency_symbol: String,

    /// Product image URL
    #[serde(default)]
    pub product_image_url: String,

    /// Cost price
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub cost: Decimal,

    /// Unit list price
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,

    /// Optional percentage discount (0-100)
    #[serde(
        default,
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,

    /// Inventory available for sale
    #[serde(rename = "stockQTY", default, skip_serializing_if = "Option::is_none")]
    pub available_qty: Option<u32>,
}

impl Product {
    /// Snapshots the product into a line item holding `quantity` units.
    pub fn to_line_item(&self, quantity: u32) -> LineItem {
        LineItem {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            brand_name: self.brand_name.clone(),
            category_name: self.category_name.clone(),
            product_description: self.product_description.clone(),
            currency_symbol: self.currency_symbol.clone(),
            product_image_url: self.product_image_url.clone(),
            cost: self.cost,
            price: self.price,
            discount: self.discount,
            quantity,
        }
    }
}
