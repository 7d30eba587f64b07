//! Summary
//!
//! Plain-text rendering of a container and its totals.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    containers::{Container, ContainerKind},
    pricing::{PricingError, Totals, discounted_unit_price, format_money, line_total},
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the container's lines and totals to `out`.
///
/// # Errors
///
/// Returns a [`SummaryError`] if a line total overflows or writing fails.
pub fn write_summary<K: ContainerKind>(
    mut out: impl io::Write,
    container: &Container<K>,
    totals: &Totals,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    if container.is_empty() {
        return writeln!(out, "Your {} is empty.", K::LABEL).map_err(|_err| SummaryError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Qty", "Unit Price", "Discounted", "Line Total"]);

    for item in container {
        builder.push_record([
            item.product_id.to_string(),
            item.product_name.clone(),
            item.quantity.to_string(),
            format_money(item.price, currency),
            format_money(discounted_unit_price(item), currency),
            format_money(line_total(item)?, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;

    write_totals(&mut out, totals, currency)
}

fn write_totals(
    out: &mut impl io::Write,
    totals: &Totals,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    let delivery_note = if totals.free_delivery {
        " (free delivery)"
    } else {
        ""
    };

    writeln!(out, "Subtotal:     {}", format_money(totals.subtotal, currency))
        .and_then(|()| {
            writeln!(
                out,
                "Delivery Fee: {}{delivery_note}",
                format_money(totals.delivery_fee, currency)
            )
        })
        .and_then(|()| writeln!(out, "Total:        {}", format_money(totals.total, currency)))
        .map_err(|_err| SummaryError::IO)?;

    if !totals.savings.is_zero() {
        writeln!(
            out,
            "Discounts:    {}",
            format_money(totals.savings, currency)
        )
        .map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}
