//! Order service client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{checkout::OrderRequest, items::OrderLine};

const ADD_ORDER_PATH: &str = "/api/Order/add";
const ADD_TO_CART_PATH: &str = "/api/Order/addtocart";
const ADD_TO_FAVOURITE_PATH: &str = "/api/Order/addtofavourite";

/// Errors that can occur when talking to the order service.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// An HTTP transport or serialization error occurred.
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// External order endpoints.
#[automock]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submit an order.
    async fn add_order(&self, order: &OrderRequest) -> Result<Value, OrderServiceError>;

    /// Mirror the cart's lines to the server.
    async fn add_to_cart(&self, lines: &[OrderLine]) -> Result<Value, OrderServiceError>;

    /// Mirror the favourites' lines to the server.
    async fn add_to_favourite(&self, lines: &[OrderLine]) -> Result<Value, OrderServiceError>;
}

/// Configuration for the HTTP order service.
#[derive(Debug, Clone)]
pub struct HttpOrderServiceConfig {
    /// Base URL, e.g. `"https://shop.example"`.
    pub base_url: String,

    /// Optional bearer token sent with every request.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// JSON-over-HTTP order service.
#[derive(Debug, Clone)]
pub struct HttpOrderService {
    config: HttpOrderServiceConfig,
    http: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartLines<'a> {
    order_details: &'a [OrderLine],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavouriteLines<'a> {
    favourite_items_list: &'a [OrderLine],
}

impl HttpOrderService {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::Http`] if the HTTP client cannot be built.
    pub fn new(config: HttpOrderServiceConfig) -> Result<Self, OrderServiceError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, OrderServiceError> {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));

        debug!(%url, "posting to order service");

        let mut request = self.http.post(&url).json(body);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OrderServiceError::UnexpectedResponse(format!(
                "{path} failed with status {status}: {text}"
            )));
        }

        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[async_trait]
impl OrderService for HttpOrderService {
    async fn add_order(&self, order: &OrderRequest) -> Result<Value, OrderServiceError> {
        self.post(ADD_ORDER_PATH, order).await
    }

    async fn add_to_cart(&self, lines: &[OrderLine]) -> Result<Value, OrderServiceError> {
        self.post(
            ADD_TO_CART_PATH,
            &CartLines {
                order_details: lines,
            },
        )
        .await
    }

    async fn add_to_favourite(&self, lines: &[OrderLine]) -> Result<Value, OrderServiceError> {
        self.post(
            ADD_TO_FAVOURITE_PATH,
            &FavouriteLines {
                favourite_items_list: lines,
            },
        )
        .await
    }
}
