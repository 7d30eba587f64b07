use std::{io, sync::Arc};

use clap::{Parser, Subcommand};
use kiosk::{
    catalog::Catalog,
    checkout::HttpOrderService,
    config::AppConfig,
    containers::{Cart, ContainerKind, Favourites},
    storage::{FileStorage, Storage},
    store::Store,
    summary::write_summary,
};

mod catalog;
mod checkout;
mod container;
mod sync;

#[derive(Debug, Parser)]
#[command(name = "kiosk", about = "Storefront cart and favourites", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the shopping cart
    #[command(subcommand)]
    Cart(container::ContainerCommand),

    /// Manage the favourites list
    #[command(subcommand)]
    Favourites(container::ContainerCommand),

    /// Place an order for the cart or favourites
    Checkout(checkout::CheckoutArgs),

    /// Mirror the cart and favourites to the storefront API
    Sync,

    /// List catalog products
    Catalog,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => {
                container::run::<Cart>(&self.config, open_storage(&self.config)?, command)
            }
            Commands::Favourites(command) => {
                container::run::<Favourites>(&self.config, open_storage(&self.config)?, command)
            }
            Commands::Checkout(args) => {
                checkout::run(&self.config, open_storage(&self.config)?, args).await
            }
            Commands::Sync => sync::run(&self.config, open_storage(&self.config)?).await,
            Commands::Catalog => catalog::run(&self.config),
        }
    }
}

fn open_storage(config: &AppConfig) -> Result<Arc<dyn Storage>, String> {
    let storage = FileStorage::open(config.storage.storage_dir.clone())
        .map_err(|error| format!("failed to open storage: {error}"))?;

    Ok(Arc::new(storage))
}

fn load_catalog(config: &AppConfig) -> Result<Catalog, String> {
    Catalog::load(&config.storage.catalog).map_err(|error| {
        format!(
            "failed to load catalog {}: {error}",
            config.storage.catalog.display()
        )
    })
}

fn order_service(config: &AppConfig) -> Result<HttpOrderService, String> {
    HttpOrderService::new(config.api.order_service())
        .map_err(|error| format!("failed to build order client: {error}"))
}

fn print_summary<K: ContainerKind>(config: &AppConfig, store: &Store<K>) -> Result<(), String> {
    let currency = config.pricing.currency().map_err(|error| error.to_string())?;
    let totals = store
        .totals(&config.pricing.delivery_policy())
        .map_err(|error| error.to_string())?;

    write_summary(io::stdout().lock(), store.get(), &totals, currency)
        .map_err(|error| format!("failed to write summary: {error}"))
}
