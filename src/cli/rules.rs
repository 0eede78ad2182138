use std::io;

use clap::{Args, Subcommand};
use percent_shipping::{
    rules::{RuleId, ShippingRule, draft::RuleDraft, percentage::RulePercentage},
    service::ShippingService,
    store::RuleStore,
    tags::{collection::TagCollection, string::StringTagCollection},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct RulesCommand {
    #[command(subcommand)]
    command: RulesSubcommand,
}

#[derive(Debug, Subcommand)]
enum RulesSubcommand {
    /// List stored rules
    List(ListArgs),

    /// Show one rule
    Show(ShowArgs),

    /// Create a rule, or update it when --id is given
    Save(SaveArgs),

    /// Delete a rule
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only list active rules
    #[arg(long)]
    active: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Rule id
    id: u64,
}

#[derive(Debug, Args)]
struct SaveArgs {
    /// Id of the rule to update; a new rule is created when omitted
    #[arg(long)]
    id: Option<u64>,

    /// Display title, used as the line item label
    #[arg(long)]
    title: String,

    /// Two-letter country code; any country when omitted
    #[arg(long, default_value = "")]
    country: String,

    /// Category slug; repeat for several, any category when omitted
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Product type (simple, variable, grouped, external); repeatable
    #[arg(long = "product-type")]
    product_types: Vec<String>,

    /// Share of the cart subtotal, e.g. 5 or 12.5%
    #[arg(long)]
    percentage: RulePercentage,

    /// Store the rule without applying it to quotes
    #[arg(long)]
    inactive: bool,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Rule id
    id: u64,

    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
}

pub(crate) fn run<S: RuleStore>(
    command: RulesCommand,
    mut service: ShippingService<S>,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command.command {
        RulesSubcommand::List(args) => {
            let rules = if args.active {
                service.active_rules()?
            } else {
                service.rules()?
            };

            if rules.is_empty() {
                writeln!(out, "no shipping rules found")?;
                return Ok(());
            }

            writeln!(out, "{}", render_rules(&rules))?;
        }
        RulesSubcommand::Show(args) => {
            let rule = service.rule(RuleId::new(args.id))?;

            writeln!(out, "{}", render_rule(&rule))?;
        }
        RulesSubcommand::Save(args) => {
            let id = args.id.map(RuleId::new);
            let draft = RuleDraft {
                title: args.title,
                country: args.country,
                categories: args.categories,
                product_types: args.product_types,
                percentage: Some(args.percentage.points()),
                active: !args.inactive,
            };

            let id = service.save_rule(id, &draft)?;

            writeln!(out, "saved shipping rule {id}")?;
        }
        RulesSubcommand::Delete(args) => {
            let id = RuleId::new(args.id);

            if !args.yes {
                return Err(CliError::DeleteNotConfirmed(id));
            }

            service.delete_rule(id)?;

            writeln!(out, "deleted shipping rule {id}")?;
        }
    }

    Ok(())
}

fn render_rules(rules: &[ShippingRule]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "ID",
        "Title",
        "Country",
        "Categories",
        "Product Types",
        "Percentage",
        "Active",
    ]);

    for rule in rules {
        builder.push_record([
            rule.id().to_string(),
            rule.title().to_string(),
            display_or_any(rule.country()),
            display_tags(rule.categories()),
            display_tags(rule.product_types()),
            rule.percentage().to_string(),
            display_flag(rule.is_active()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(5..6), Alignment::right());

    table.to_string()
}

fn render_rule(rule: &ShippingRule) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID".to_string(), rule.id().to_string()]);
    builder.push_record(["Title".to_string(), rule.title().to_string()]);
    builder.push_record(["Country".to_string(), display_or_any(rule.country())]);
    builder.push_record(["Categories".to_string(), display_tags(rule.categories())]);
    builder.push_record(["Product Types".to_string(), display_tags(rule.product_types())]);
    builder.push_record(["Percentage".to_string(), rule.percentage().to_string()]);
    builder.push_record(["Active".to_string(), display_flag(rule.is_active())]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    table.to_string()
}

fn display_or_any(value: &str) -> String {
    if value.is_empty() {
        "any".to_string()
    } else {
        value.to_string()
    }
}

fn display_tags(tags: &StringTagCollection) -> String {
    if tags.is_empty() {
        "any".to_string()
    } else {
        tags.to_string()
    }
}

fn display_flag(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
