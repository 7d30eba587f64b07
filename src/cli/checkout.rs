use std::{
    io::{self, Write},
    sync::Arc,
};

use clap::{Args, ValueEnum};
use kiosk::{
    checkout::{DEFAULT_PAYMENT_TYPE, DeliveryDetails, OrderService, PendingOrder},
    config::AppConfig,
    containers::{Cart, ContainerKind, Favourites},
    pricing::format_money,
    storage::Storage,
    store::Store,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Source {
    Cart,
    Favourites,
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Container to order from
    #[arg(long, value_enum, default_value_t = Source::Cart)]
    from: Source,

    /// Recipient name
    #[arg(long)]
    full_name: String,

    /// Region or state
    #[arg(long)]
    region: String,

    /// Contact phone number
    #[arg(long)]
    phone_number: String,

    /// City
    #[arg(long)]
    city: String,

    /// Township
    #[arg(long)]
    township: String,

    /// Street address
    #[arg(long)]
    address: String,

    /// Payment type
    #[arg(long, default_value = DEFAULT_PAYMENT_TYPE)]
    payment_type: String,
}

impl CheckoutArgs {
    fn into_parts(self) -> (Source, DeliveryDetails) {
        (
            self.from,
            DeliveryDetails {
                full_name: self.full_name,
                region: self.region,
                phone_number: self.phone_number,
                city: self.city,
                township: self.township,
                address: self.address,
                payment_type: self.payment_type,
            },
        )
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    storage: Arc<dyn Storage>,
    args: CheckoutArgs,
) -> Result<(), String> {
    let service = super::order_service(config)?;
    let (source, details) = args.into_parts();

    match source {
        Source::Cart => checkout::<Cart>(config, storage, &service, &details).await,
        Source::Favourites => checkout::<Favourites>(config, storage, &service, &details).await,
    }
}

async fn checkout<K: ContainerKind>(
    config: &AppConfig,
    storage: Arc<dyn Storage>,
    service: &dyn OrderService,
    details: &DeliveryDetails,
) -> Result<(), String> {
    let currency = config.pricing.currency().map_err(|error| error.to_string())?;
    let mut store = Store::<K>::open(storage);

    let pending = PendingOrder::prepare(store.get(), details, &config.pricing.delivery_policy())
        .map_err(|error| error.to_string())?;

    let outcome = pending.submit(service).await;
    let response = pending
        .complete(&mut store, outcome)
        .map_err(|error| format!("checkout failed, your {} was kept: {error}", K::LABEL))?;

    let totals = pending.totals();
    let mut out = io::stdout().lock();

    writeln!(
        out,
        "Order placed: {} items, total {} (delivery {})",
        pending.request().order_details.len(),
        format_money(totals.total, currency),
        format_money(totals.delivery_fee, currency)
    )
    .and_then(|()| {
        if response.is_null() {
            Ok(())
        } else {
            writeln!(out, "{response}")
        }
    })
    .map_err(|error| format!("failed to write order confirmation: {error}"))
}
