//! Pricing
//!
//! Totals are derived from container items on every read. All totals use the
//! unit list price; the discounted unit price is for presentation only and
//! never feeds the order payload.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, MMK, THB, USD},
};
use thiserror::Error;

use crate::items::LineItem;

/// Delivery fee charged when no other fee is supplied.
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Subtotal at or above which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(500_000, 0, 0, false, 0);

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A line or running total no longer fits in a decimal.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Price of one line: unit list price times quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn line_total(item: &LineItem) -> Result<Decimal, PricingError> {
    item.price
        .checked_mul(Decimal::from(item.quantity))
        .ok_or(PricingError::Overflow)
}

/// Sum of `price * quantity` over all items. Empty input yields zero.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step overflows.
pub fn subtotal<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Result<Decimal, PricingError> {
    items.into_iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(line_total(item)?)
            .ok_or(PricingError::Overflow)
    })
}

/// Unit price after the item's percentage discount.
///
/// Discounts outside 0-100 are clamped.
pub fn discounted_unit_price(item: &LineItem) -> Decimal {
    let percent = item
        .discount_percent()
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);

    if percent.is_zero() {
        return item.price;
    }

    let fraction = Percentage::from(percent / Decimal::ONE_HUNDRED);

    item.price - fraction * item.price
}

/// What the buyer saves across all items if discounts were honoured.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step overflows.
pub fn savings<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Result<Decimal, PricingError> {
    items.into_iter().try_fold(Decimal::ZERO, |acc, item| {
        (item.price - discounted_unit_price(item))
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| acc.checked_add(line))
            .ok_or(PricingError::Overflow)
    })
}

/// Delivery fee policy: a flat fee waived at a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    fee: Decimal,
    free_threshold: Decimal,
}

impl DeliveryPolicy {
    /// Create a policy with the given fee and free-delivery threshold.
    #[must_use]
    pub fn new(fee: Decimal, free_threshold: Decimal) -> Self {
        Self {
            fee,
            free_threshold,
        }
    }

    /// Same threshold, different fee.
    #[must_use]
    pub fn with_fee(self, fee: Decimal) -> Self {
        Self { fee, ..self }
    }

    /// The fee charged below the threshold.
    pub fn fee(&self) -> Decimal {
        self.fee
    }

    /// The free-delivery threshold.
    pub fn free_threshold(&self) -> Decimal {
        self.free_threshold
    }

    /// Whether `subtotal` qualifies for free delivery.
    pub fn is_free(&self, subtotal: Decimal) -> bool {
        subtotal >= self.free_threshold
    }

    /// Fee to charge for `subtotal`.
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if self.is_free(subtotal) {
            Decimal::ZERO
        } else {
            self.fee
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERY_FEE, FREE_DELIVERY_THRESHOLD)
    }
}

/// Derived totals for a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of list price times quantity
    pub subtotal: Decimal,

    /// Delivery fee after the free-delivery override
    pub delivery_fee: Decimal,

    /// Subtotal plus delivery fee
    pub total: Decimal,

    /// Discount savings, for display
    pub savings: Decimal,

    /// Whether the free-delivery threshold was reached
    pub free_delivery: bool,
}

impl Totals {
    /// Calculate totals for `items` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any step overflows.
    pub fn calculate(items: &[LineItem], policy: &DeliveryPolicy) -> Result<Self, PricingError> {
        let subtotal = subtotal(items)?;
        let delivery_fee = policy.fee_for(subtotal);
        let total = subtotal
            .checked_add(delivery_fee)
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            delivery_fee,
            total,
            savings: savings(items)?,
            free_delivery: policy.is_free(subtotal),
        })
    }
}

/// Look up a supported ISO currency by code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, PricingError> {
    let currency = match code.trim().to_ascii_uppercase().as_str() {
        "MMK" => MMK,
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        "THB" => THB,
        other => return Err(PricingError::UnknownCurrency(other.to_string())),
    };

    Ok(currency)
}

/// Format an amount in the given currency for display.
pub fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::test_support::item;

    use super::*;

    #[test]
    fn constants_match_storefront_defaults() {
        assert_eq!(DEFAULT_DELIVERY_FEE, Decimal::from(2000));
        assert_eq!(FREE_DELIVERY_THRESHOLD, Decimal::from(500_000));
    }

    #[test]
    fn subtotal_of_no_items_is_zero() -> TestResult {
        let items: [LineItem; 0] = [];

        assert_eq!(subtotal(&items)?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn subtotal_ignores_discount() -> TestResult {
        let mut discounted = item("p1", 1000, 3);
        discounted.discount = Some(Decimal::from(50));

        let items = [discounted, item("p2", 500, 1)];

        assert_eq!(subtotal(&items)?, Decimal::from(3500));

        Ok(())
    }

    #[test]
    fn discounted_unit_price_applies_percentage() {
        let mut discounted = item("p1", 1000, 1);
        discounted.discount = Some(Decimal::from(15));

        assert_eq!(discounted_unit_price(&discounted), Decimal::from(850));
    }

    #[test]
    fn discounted_unit_price_without_discount_is_list_price() {
        let plain = item("p1", 1000, 1);

        assert_eq!(discounted_unit_price(&plain), Decimal::from(1000));
    }

    #[test]
    fn discount_over_one_hundred_is_clamped() {
        let mut discounted = item("p1", 1000, 1);
        discounted.discount = Some(Decimal::from(150));

        assert_eq!(discounted_unit_price(&discounted), Decimal::ZERO);
    }

    #[test]
    fn savings_sum_discounts_over_quantity() -> TestResult {
        let mut discounted = item("p1", 1000, 2);
        discounted.discount = Some(Decimal::from(10));

        let items = [discounted, item("p2", 500, 4)];

        assert_eq!(savings(&items)?, Decimal::from(200));

        Ok(())
    }

    #[test]
    fn free_delivery_at_exact_threshold() {
        let policy = DeliveryPolicy::default();

        assert_eq!(policy.fee_for(Decimal::from(500_000)), Decimal::ZERO);
        assert!(policy.is_free(Decimal::from(500_000)));
    }

    #[test]
    fn fee_kept_just_below_threshold() {
        let policy = DeliveryPolicy::default().with_fee(Decimal::from(3500));

        assert_eq!(policy.fee_for(Decimal::from(499_999)), Decimal::from(3500));
    }

    #[test]
    fn totals_add_delivery_fee_below_threshold() -> TestResult {
        let items = [item("p1", 1000, 3), item("p2", 500, 1)];

        let totals = Totals::calculate(&items, &DeliveryPolicy::default())?;

        assert_eq!(totals.subtotal, Decimal::from(3500));
        assert_eq!(totals.delivery_fee, Decimal::from(2000));
        assert_eq!(totals.total, Decimal::from(5500));
        assert!(!totals.free_delivery);

        Ok(())
    }

    #[test]
    fn totals_waive_fee_above_threshold() -> TestResult {
        let items = [item("tv", 250_000, 2)];

        let totals = Totals::calculate(&items, &DeliveryPolicy::default())?;

        assert_eq!(totals.delivery_fee, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::from(500_000));
        assert!(totals.free_delivery);

        Ok(())
    }

    #[test]
    fn line_total_overflow_is_reported() {
        let huge = LineItem {
            price: Decimal::MAX,
            ..item("p1", 0, 2)
        };

        assert_eq!(line_total(&huge), Err(PricingError::Overflow));
    }

    #[test]
    fn parse_currency_accepts_lowercase() -> TestResult {
        assert_eq!(parse_currency("mmk")?, MMK);

        Ok(())
    }

    #[test]
    fn parse_currency_rejects_unknown() {
        assert_eq!(
            parse_currency("XYZ"),
            Err(PricingError::UnknownCurrency("XYZ".to_string()))
        );
    }
}
