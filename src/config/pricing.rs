//! Pricing Config

use clap::Args;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::pricing::{DEFAULT_DELIVERY_FEE, DeliveryPolicy, FREE_DELIVERY_THRESHOLD, PricingError};

/// Delivery fee and currency settings.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Delivery fee charged below the free-delivery threshold
    #[arg(long, env = "KIOSK_DELIVERY_FEE", default_value_t = DEFAULT_DELIVERY_FEE)]
    pub delivery_fee: Decimal,

    /// Subtotal at or above which delivery is free
    #[arg(long, env = "KIOSK_FREE_DELIVERY_THRESHOLD", default_value_t = FREE_DELIVERY_THRESHOLD)]
    pub free_delivery_threshold: Decimal,

    /// ISO currency code used to display totals
    #[arg(long, env = "KIOSK_CURRENCY", default_value = "MMK")]
    pub currency: String,
}

impl PricingConfig {
    /// Delivery policy built from these settings.
    #[must_use]
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::new(self.delivery_fee, self.free_delivery_threshold)
    }

    /// Display currency.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, PricingError> {
        crate::pricing::parse_currency(&self.currency)
    }
}
