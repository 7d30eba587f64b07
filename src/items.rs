//! Items

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque product identifier, the key line items are merged on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One product held in a cart or favourites container.
///
/// Field names on the wire match the storefront's persisted shape, so state
/// written by earlier sessions rehydrates unchanged. `quantity` is stored as
/// `stockQTY` and always means "how many of this product the container holds".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub product_name: String,

    /// Brand name
    pub brand_name: String,

    /// Category instance name
    #[serde(rename = "catInstanceName")]
    pub category_name: String,

    /// Product description
    pub product_description: String,

    /// Currency symbol used when the product was listed
    pub currency_symbol: String,

    /// Product image URL
    pub product_image_url: String,

    /// Cost price, informational only
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
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

    /// Quantity held in the container
    #[serde(rename = "stockQTY")]
    pub quantity: u32,
}

impl LineItem {
    /// Returns a copy of this item holding `quantity` units.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Discount percentage, treating an absent discount as zero.
    pub fn discount_percent(&self) -> Decimal {
        self.discount.unwrap_or(Decimal::ZERO)
    }

    /// Converts the item into an order line.
    pub fn order_line(&self) -> OrderLine {
        OrderLine {
            product_id: self.product_id.clone(),
            qty: self.quantity,
        }
    }
}

/// A `{productId, qty}` pair as sent to the order endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Product identifier
    pub product_id: ProductId,

    /// Quantity ordered
    pub qty: u32,
}
