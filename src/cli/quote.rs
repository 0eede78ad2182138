use std::{io, path::PathBuf};

use clap::Args;
use percent_shipping::{
    calculator::{self, LineItem},
    fixtures::Fixture,
    service::ShippingService,
    store::RuleStore,
};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::info;

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Directory holding `products/` and `carts/` fixture files
    #[arg(long, default_value = "fixtures")]
    fixtures: PathBuf,

    /// Products fixture name (`products/<NAME>.yml`)
    #[arg(long)]
    products: String,

    /// Cart fixture name (`carts/<NAME>.yml`)
    #[arg(long)]
    cart: String,
}

pub(crate) fn run<S: RuleStore>(
    args: &QuoteArgs,
    service: &ShippingService<S>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let mut fixture = Fixture::with_base_path(&args.fixtures);
    fixture.load_products(&args.products)?;

    let (cart, customer) = fixture.load_cart(&args.cart)?;
    let subtotal = cart.subtotal(fixture.catalogue())?;
    let line_items = service.quote_cart(&cart, fixture.catalogue(), &customer)?;
    let total = calculator::total(&line_items, cart.currency())?;

    info!(
        line_item_count = line_items.len(),
        customer_country = %customer.billing_country,
        "quoted shipping"
    );

    writeln!(out, "{}", render_quote(&line_items, &subtotal, &total))?;

    Ok(())
}

fn render_quote(
    line_items: &[LineItem<'_>],
    subtotal: &Money<'_, Currency>,
    total: &Money<'_, Currency>,
) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Shipping".to_string(), "Amount".to_string()]);

    if line_items.is_empty() {
        builder.push_record(["no shipping rules apply".to_string(), String::new()]);
    }

    for line_item in line_items {
        builder.push_record([line_item.label.clone(), line_item.amount.to_string()]);
    }

    builder.push_record(["Cart subtotal".to_string(), subtotal.to_string()]);
    builder.push_record(["Shipping total".to_string(), total.to_string()]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    table.to_string()
}
