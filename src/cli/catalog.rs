use std::io::{self, Write};

use kiosk::{config::AppConfig, pricing::format_money};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

pub(crate) fn run(config: &AppConfig) -> Result<(), String> {
    let catalog = super::load_catalog(config)?;
    let currency = config.pricing.currency().map_err(|error| error.to_string())?;

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Brand", "Category", "Price", "Discount", "Stock"]);

    for product in &catalog {
        builder.push_record([
            product.product_id.to_string(),
            product.product_name.clone(),
            product.brand_name.clone(),
            product.category_name.clone(),
            format_money(product.price, currency),
            product
                .discount
                .map_or_else(String::new, |discount| format!("{discount}%")),
            product
                .available_qty
                .map_or_else(String::new, |qty| qty.to_string()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(4..), Alignment::right());

    writeln!(io::stdout().lock(), "{table}")
        .map_err(|error| format!("failed to write catalog: {error}"))
}
