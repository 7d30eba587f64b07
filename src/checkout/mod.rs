//! Checkout
//!
//! Checkout snapshots a container into an [`OrderRequest`], submits it to an
//! [`OrderService`] and clears the container only once the service accepts
//! the order. A failed submission leaves the container untouched so the
//! buyer can retry.
//!
//! [`PendingOrder`] splits this into prepare, submit and complete steps, so
//! the store stays free for other mutations while a submission is in flight.
//! [`place_order`] runs all three in one go.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    containers::{Cart, Container, ContainerKind, Favourites},
    items::OrderLine,
    pricing::{DeliveryPolicy, PricingError, Totals},
    store::Store,
};

mod service;

pub use service::{
    HttpOrderService, HttpOrderServiceConfig, MockOrderService, OrderService, OrderServiceError,
};

/// Payment type used when the buyer picks none.
pub const DEFAULT_PAYMENT_TYPE: &str = "CashOnDelivery";

/// Errors raised during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("your {0} is empty")]
    EmptyContainer(&'static str),

    /// A required delivery field is blank.
    #[error("missing delivery information: {0}")]
    MissingField(&'static str),

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The order service rejected or failed the submission.
    #[error("failed to place order")]
    Submission(#[from] OrderServiceError),
}

/// Where and how the order is delivered and paid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    /// Recipient name
    pub full_name: String,

    /// Region or state
    pub region: String,

    /// Contact phone number
    pub phone_number: String,

    /// City
    pub city: String,

    /// Township
    pub township: String,

    /// Street address
    pub address: String,

    /// Payment type, passed through as-is
    pub payment_type: String,
}

impl DeliveryDetails {
    /// Check that every required field is filled in.
    ///
    /// A blank payment type falls back to [`DEFAULT_PAYMENT_TYPE`] rather than
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        [
            ("full name", &self.full_name),
            ("phone number", &self.phone_number),
            ("region", &self.region),
            ("city", &self.city),
            ("township", &self.township),
            ("address", &self.address),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(CheckoutError::MissingField(field)))
    }

    fn payment_type_or_default(&self) -> String {
        if self.payment_type.trim().is_empty() {
            DEFAULT_PAYMENT_TYPE.to_string()
        } else {
            self.payment_type.clone()
        }
    }
}

/// Body of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Ordered products and quantities
    pub order_details: Vec<OrderLine>,

    /// Recipient name
    pub full_name: String,

    /// Region or state
    pub region: String,

    /// Contact phone number
    pub phone_number: String,

    /// City
    pub city: String,

    /// Township
    pub township: String,

    /// Street address
    pub address: String,

    /// Payment type
    pub payment_type: String,

    /// Delivery fee after the free-delivery override
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub deli_fee: Decimal,
}

/// An order built from a container snapshot, not yet submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrder {
    request: OrderRequest,
    totals: Totals,
    label: &'static str,
}

impl PendingOrder {
    /// Snapshot `container` into an order.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if a delivery field is blank, the container
    /// is empty, or totals overflow. Delivery fields are checked first.
    pub fn prepare<K: ContainerKind>(
        container: &Container<K>,
        details: &DeliveryDetails,
        policy: &DeliveryPolicy,
    ) -> Result<Self, CheckoutError> {
        details.validate()?;

        if container.is_empty() {
            return Err(CheckoutError::EmptyContainer(K::LABEL));
        }

        let totals = Totals::calculate(container.items(), policy)?;

        let request = OrderRequest {
            order_details: container.order_lines(),
            full_name: details.full_name.clone(),
            region: details.region.clone(),
            phone_number: details.phone_number.clone(),
            city: details.city.clone(),
            township: details.township.clone(),
            address: details.address.clone(),
            payment_type: details.payment_type_or_default(),
            deli_fee: totals.delivery_fee,
        };

        Ok(Self {
            request,
            totals,
            label: K::LABEL,
        })
    }

    /// The request body that will be submitted.
    pub fn request(&self) -> &OrderRequest {
        &self.request
    }

    /// Totals at the time the order was prepared.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Send the order to `service`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Submission`] if the service fails.
    pub async fn submit(&self, service: &dyn OrderService) -> Result<Value, CheckoutError> {
        match service.add_order(&self.request).await {
            Ok(response) => {
                info!(
                    container = self.label,
                    lines = self.request.order_details.len(),
                    total = %self.totals.total,
                    "order placed"
                );

                Ok(response)
            }
            Err(error) => {
                warn!(container = self.label, %error, "order submission failed");

                Err(error.into())
            }
        }
    }

    /// Settle the submission outcome against `store`: clear on success, keep
    /// the items on failure.
    ///
    /// # Errors
    ///
    /// Passes a failed `outcome` through unchanged.
    pub fn complete<K: ContainerKind>(
        &self,
        store: &mut Store<K>,
        outcome: Result<Value, CheckoutError>,
    ) -> Result<Value, CheckoutError> {
        let response = outcome?;

        store.clear();

        info!(container = self.label, "cleared after checkout");

        Ok(response)
    }
}

/// Prepare, submit and settle an order for the container in `store`.
///
/// # Errors
///
/// Returns a [`CheckoutError`] if validation fails or the service rejects the
/// order; the container is left untouched in both cases.
pub async fn place_order<K: ContainerKind>(
    store: &mut Store<K>,
    service: &dyn OrderService,
    details: &DeliveryDetails,
    policy: &DeliveryPolicy,
) -> Result<Value, CheckoutError> {
    let pending = PendingOrder::prepare(store.get(), details, policy)?;
    let outcome = pending.submit(service).await;

    pending.complete(store, outcome)
}

/// Mirror the cart's lines to the server.
///
/// # Errors
///
/// Returns an [`OrderServiceError`] if the service fails.
pub async fn sync_cart(
    cart: &Container<Cart>,
    service: &dyn OrderService,
) -> Result<Value, OrderServiceError> {
    service.add_to_cart(&cart.order_lines()).await
}

/// Mirror the favourites' lines to the server.
///
/// # Errors
///
/// Returns an [`OrderServiceError`] if the service fails.
pub async fn sync_favourites(
    favourites: &Container<Favourites>,
    service: &dyn OrderService,
) -> Result<Value, OrderServiceError> {
    service.add_to_favourite(&favourites.order_lines()).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        items::{ProductId, test_support::item},
        storage::MemoryStorage,
        store::{CartStore, FavouritesStore},
    };

    use super::*;

    fn details() -> DeliveryDetails {
        DeliveryDetails {
            full_name: "Aung Aung".to_string(),
            region: "Yangon".to_string(),
            phone_number: "09123456789".to_string(),
            city: "Yangon".to_string(),
            township: "Kamayut".to_string(),
            address: "No. 1, Main Road".to_string(),
            payment_type: String::new(),
        }
    }

    fn filled_cart() -> CartStore {
        let mut cart = CartStore::open(Arc::new(MemoryStorage::new()));

        cart.add(item("p1", 1000, 1), 3);
        cart.add(item("p2", 500, 1), 1);

        cart
    }

    #[test]
    fn prepare_builds_order_payload() -> TestResult {
        let cart = filled_cart();

        let pending = PendingOrder::prepare(cart.get(), &details(), &DeliveryPolicy::default())?;
        let body = serde_json::to_value(pending.request())?;

        assert_eq!(
            body["orderDetails"],
            json!([{ "productId": "p1", "qty": 3 }, { "productId": "p2", "qty": 1 }])
        );
        assert_eq!(body["paymentType"], json!("CashOnDelivery"));
        assert_eq!(body["fullName"], json!("Aung Aung"));
        assert_eq!(pending.request().deli_fee, Decimal::from(2000));
        assert_eq!(pending.totals().total, Decimal::from(5500));

        Ok(())
    }

    #[test]
    fn prepare_waives_fee_over_threshold() -> TestResult {
        let mut cart = CartStore::open(Arc::new(MemoryStorage::new()));
        cart.add(item("tv", 600_000, 1), 1);

        let pending = PendingOrder::prepare(cart.get(), &details(), &DeliveryPolicy::default())?;

        assert_eq!(pending.request().deli_fee, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn prepare_rejects_empty_container() {
        let favourites = FavouritesStore::open(Arc::new(MemoryStorage::new()));

        let result = PendingOrder::prepare(favourites.get(), &details(), &DeliveryPolicy::default());

        assert!(matches!(result, Err(CheckoutError::EmptyContainer("favourites"))));
    }

    #[test]
    fn blank_fields_are_reported_before_an_empty_container() {
        let cart = CartStore::open(Arc::new(MemoryStorage::new()));
        let details = DeliveryDetails {
            full_name: String::new(),
            ..details()
        };

        let result = PendingOrder::prepare(cart.get(), &details, &DeliveryPolicy::default());

        assert!(matches!(result, Err(CheckoutError::MissingField("full name"))));
    }

    #[test]
    fn prepare_rejects_blank_field() {
        let cart = filled_cart();
        let details = DeliveryDetails {
            township: "  ".to_string(),
            ..details()
        };

        let result = PendingOrder::prepare(cart.get(), &details, &DeliveryPolicy::default());

        assert!(matches!(result, Err(CheckoutError::MissingField("township"))));
    }

    #[test]
    fn payment_type_passes_through() -> TestResult {
        let cart = filled_cart();
        let details = DeliveryDetails {
            payment_type: "stripe".to_string(),
            ..details()
        };

        let pending = PendingOrder::prepare(cart.get(), &details, &DeliveryPolicy::default())?;

        assert_eq!(pending.request().payment_type, "stripe");

        Ok(())
    }

    #[tokio::test]
    async fn successful_order_clears_container() -> TestResult {
        let mut cart = filled_cart();
        let mut service = MockOrderService::new();

        service
            .expect_add_order()
            .withf(|order: &OrderRequest| order.order_details.len() == 2)
            .times(1)
            .returning(|_| Ok(json!({ "orderId": "o-1" })));

        let response =
            place_order(&mut cart, &service, &details(), &DeliveryPolicy::default()).await?;

        assert_eq!(response["orderId"], json!("o-1"));
        assert!(cart.get().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_order_keeps_container() {
        let mut cart = filled_cart();
        let before = cart.get().clone();
        let mut service = MockOrderService::new();

        service
            .expect_add_order()
            .times(1)
            .returning(|_| Err(OrderServiceError::UnexpectedResponse("503".to_string())));

        let result = place_order(&mut cart, &service, &details(), &DeliveryPolicy::default()).await;

        assert!(matches!(result, Err(CheckoutError::Submission(_))));
        assert_eq!(cart.get(), &before);
    }

    #[tokio::test]
    async fn store_stays_mutable_while_submission_is_pending() -> TestResult {
        let mut cart = filled_cart();
        let mut service = MockOrderService::new();

        service
            .expect_add_order()
            .returning(|_| Ok(Value::Null));

        let pending = PendingOrder::prepare(cart.get(), &details(), &DeliveryPolicy::default())?;
        let submission = pending.submit(&service);

        cart.increase(&ProductId::new("p2"));

        let outcome = submission.await;
        pending.complete(&mut cart, outcome)?;

        assert!(cart.get().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn sync_posts_each_container_to_its_endpoint() -> TestResult {
        let cart = filled_cart();
        let mut favourites = FavouritesStore::open(Arc::new(MemoryStorage::new()));
        favourites.add(item("p9", 100, 1), 2);

        let mut service = MockOrderService::new();

        service
            .expect_add_to_cart()
            .withf(|lines: &[OrderLine]| lines.len() == 2)
            .times(1)
            .returning(|_| Ok(Value::Null));
        service
            .expect_add_to_favourite()
            .withf(|lines: &[OrderLine]| {
                lines
                    == [OrderLine {
                        product_id: ProductId::new("p9"),
                        qty: 2,
                    }]
            })
            .times(1)
            .returning(|_| Ok(Value::Null));

        sync_cart(cart.get(), &service).await?;
        sync_favourites(favourites.get(), &service).await?;

        Ok(())
    }
}
