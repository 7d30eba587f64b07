//! Order API Config

use std::time::Duration;

use clap::Args;

use crate::checkout::HttpOrderServiceConfig;

/// Order service settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront API base URL
    #[arg(long, env = "KIOSK_API_BASE_URL", default_value = "http://localhost:5000")]
    pub api_base_url: String,

    /// Bearer token for the storefront API
    #[arg(long, env = "KIOSK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "KIOSK_API_TIMEOUT_SECONDS", default_value_t = 10u64)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// HTTP order service settings.
    #[must_use]
    pub fn order_service(&self) -> HttpOrderServiceConfig {
        HttpOrderServiceConfig {
            base_url: self.api_base_url.clone(),
            token: self.api_token.clone(),
            timeout: Duration::from_secs(self.api_timeout_seconds),
        }
    }
}
