use std::sync::Arc;

use clap::Subcommand;
use kiosk::{
    config::AppConfig,
    containers::ContainerKind,
    items::ProductId,
    storage::Storage,
    store::Store,
};
use tracing::warn;

#[derive(Debug, Subcommand)]
pub(crate) enum ContainerCommand {
    /// Add a catalog product
    Add {
        /// Product id from the catalog
        product_id: String,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// Add one unit of a held product
    Increase {
        /// Product id
        product_id: String,
    },

    /// Remove one unit of a held product
    Decrease {
        /// Product id
        product_id: String,
    },

    /// Drop a product entirely
    Remove {
        /// Product id
        product_id: String,
    },

    /// Drop every product
    Clear,

    /// Print the items and totals
    Show,
}

pub(crate) fn run<K: ContainerKind>(
    config: &AppConfig,
    storage: Arc<dyn Storage>,
    command: ContainerCommand,
) -> Result<(), String> {
    let mut store = Store::<K>::open(storage);

    match command {
        ContainerCommand::Add { product_id, qty } => {
            if qty == 0 {
                return Err("quantity must be at least 1".to_string());
            }

            let catalog = super::load_catalog(config)?;
            let item = catalog
                .line_item(&ProductId::new(product_id), qty)
                .map_err(|error| error.to_string())?;

            store.add(item, qty);
        }
        ContainerCommand::Increase { product_id } => {
            let product_id = ProductId::new(product_id);

            if !store.increase(&product_id) {
                report_unchanged(&store, &product_id);
            }
        }
        ContainerCommand::Decrease { product_id } => {
            let product_id = ProductId::new(product_id);

            if !store.decrease(&product_id) {
                report_unchanged(&store, &product_id);
            }
        }
        ContainerCommand::Remove { product_id } => {
            let product_id = ProductId::new(product_id);

            if !store.remove(&product_id) {
                report_unchanged(&store, &product_id);
            }
        }
        ContainerCommand::Clear => {
            store.clear();
        }
        ContainerCommand::Show => {}
    }

    super::print_summary(config, &store)
}

fn report_unchanged<K: ContainerKind>(store: &Store<K>, product_id: &ProductId) {
    if !store.get().contains(product_id) {
        warn!(%product_id, container = K::LABEL, "product not held, nothing changed");
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use kiosk::{containers::Cart, storage::MemoryStorage, store::CartStore};
    use testresult::TestResult;

    use super::*;

    fn config() -> Result<AppConfig, clap::Error> {
        Ok(crate::cli::Cli::try_parse_from(["kiosk", "cart", "show"])?.config)
    }

    #[test]
    fn unknown_products_are_a_silent_noop() -> TestResult {
        let config = config()?;
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

        for command in [
            ContainerCommand::Increase {
                product_id: "missing".to_string(),
            },
            ContainerCommand::Decrease {
                product_id: "missing".to_string(),
            },
            ContainerCommand::Remove {
                product_id: "missing".to_string(),
            },
        ] {
            run::<Cart>(&config, Arc::clone(&storage), command)?;
        }

        assert!(CartStore::open(storage).get().is_empty());

        Ok(())
    }
}
