use std::{
    io::{self, Write},
    sync::Arc,
};

use kiosk::{
    checkout::{sync_cart, sync_favourites},
    config::AppConfig,
    storage::Storage,
    store::{CartStore, FavouritesStore},
};

pub(crate) async fn run(config: &AppConfig, storage: Arc<dyn Storage>) -> Result<(), String> {
    let service = super::order_service(config)?;
    let cart = CartStore::open(Arc::clone(&storage));
    let favourites = FavouritesStore::open(storage);

    sync_cart(cart.get(), &service)
        .await
        .map_err(|error| format!("failed to sync cart: {error}"))?;

    sync_favourites(favourites.get(), &service)
        .await
        .map_err(|error| format!("failed to sync favourites: {error}"))?;

    writeln!(
        io::stdout().lock(),
        "Synced {} cart lines and {} favourites",
        cart.get().len(),
        favourites.get().len()
    )
    .map_err(|error| format!("failed to write sync result: {error}"))
}
