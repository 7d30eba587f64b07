//! Application configuration module

use clap::Args;

pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use pricing::PricingConfig;
pub use storage::StorageConfig;

mod api;
mod logging;
mod pricing;
mod storage;

/// Kiosk configuration, read from CLI flags and the environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Persisted state settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Order service settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Delivery fee and currency settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load a `.env` file into the environment if present.
pub fn load_dotenv() {
    // Missing files are fine
    _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn defaults_match_storefront() -> TestResult {
        let cli = TestCli::try_parse_from(["kiosk"])?;
        let policy = cli.config.pricing.delivery_policy();

        assert_eq!(policy.fee(), Decimal::from(2000));
        assert_eq!(policy.free_threshold(), Decimal::from(500_000));
        assert_eq!(cli.config.pricing.currency()?.iso_alpha_code, "MMK");

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let cli = TestCli::try_parse_from([
            "kiosk",
            "--delivery-fee",
            "3000",
            "--free-delivery-threshold",
            "100000",
            "--storage-dir",
            "/tmp/kiosk-state",
            "--api-base-url",
            "https://shop.example",
            "--log-format",
            "json",
        ])?;

        let policy = cli.config.pricing.delivery_policy();

        assert_eq!(policy.fee(), Decimal::from(3000));
        assert_eq!(policy.free_threshold(), Decimal::from(100_000));
        assert_eq!(cli.config.storage.storage_dir.to_str(), Some("/tmp/kiosk-state"));
        assert_eq!(cli.config.api.api_base_url, "https://shop.example");
        assert!(matches!(cli.config.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
