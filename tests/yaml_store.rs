//! The YAML rule store behind the shipping service.

use rust_decimal::Decimal;
use tempfile::TempDir;
use testresult::TestResult;

use percent_shipping::prelude::*;

fn draft(title: &str, active: bool) -> RuleDraft {
    RuleDraft {
        title: title.to_string(),
        country: "ES".to_string(),
        categories: vec!["books".to_string(), "magazines".to_string()],
        product_types: vec!["simple".to_string()],
        percentage: Some(Decimal::new(125, 1)),
        active,
    }
}

#[test]
fn saved_rules_survive_a_restart() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("rules.yml");

    let id = ShippingService::new(YamlRuleStore::open(&path)).save_rule(None, &draft("Spain", true))?;

    let service = ShippingService::new(YamlRuleStore::open(&path));
    let rule = service.rule(id)?;

    assert_eq!(rule.to_draft(), draft("Spain", true));
    assert_eq!(rule.percentage().to_string(), "12.5%");

    Ok(())
}

#[test]
fn active_listing_excludes_inactive_rules() -> TestResult {
    let dir = TempDir::new()?;
    let mut service = ShippingService::new(YamlRuleStore::open(dir.path().join("rules.yml")));

    let on = service.save_rule(None, &draft("On", true))?;
    service.save_rule(None, &draft("Off", false))?;

    let active: Vec<RuleId> = service.active_rules()?.iter().map(ShippingRule::id).collect();

    assert_eq!(active, [on]);
    assert_eq!(service.rules()?.len(), 2);

    Ok(())
}

#[test]
fn a_corrupt_rules_file_does_not_break_quoting() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("rules.yml");
    std::fs::write(
        &path,
        "next_id: 2\nrules:\n  - id: 1\n    title: Broken\n    percentage: 250\n",
    )?;

    let service = ShippingService::new(YamlRuleStore::open(&path));

    assert!(matches!(
        service.rules(),
        Err(ServiceError::Storage(StoreError::CorruptRecord { .. }))
    ));

    let ctx = CartContext::new(
        "ES",
        StringTagCollection::from_strs(&["books"]),
        StringTagCollection::empty(),
        rusty_money::Money::from_minor(1_000, rusty_money::iso::EUR),
    );

    assert!(service.quote(&ctx).is_empty());

    Ok(())
}

#[test]
fn an_uncreatable_rules_file_quotes_nothing_and_refuses_writes() -> TestResult {
    let dir = TempDir::new()?;
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory")?;

    let mut service = ShippingService::new(YamlRuleStore::open(blocker.join("rules.yml")));

    let ctx = CartContext::new(
        "ES",
        StringTagCollection::from_strs(&["books"]),
        StringTagCollection::empty(),
        rusty_money::Money::from_minor(1_000, rusty_money::iso::EUR),
    );

    assert!(service.quote(&ctx).is_empty());
    assert!(matches!(
        service.save_rule(None, &draft("Nowhere", true)),
        Err(ServiceError::Storage(StoreError::Io(_)))
    ));

    Ok(())
}
