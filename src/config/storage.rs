//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where persisted containers live.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding one JSON document per container
    #[arg(long, env = "KIOSK_STORAGE_DIR", default_value = ".kiosk")]
    pub storage_dir: PathBuf,

    /// YAML product catalog
    #[arg(long, env = "KIOSK_CATALOG", default_value = "fixtures/catalog/default.yml")]
    pub catalog: PathBuf,
}
