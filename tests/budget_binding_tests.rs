mod common;

use std::cell::Cell;
use std::rc::Rc;

use budget_splits::budget::{Binding, BudgetType, CellKind, CellSource, MemorySheet, SheetName};
use budget_splits::config::Config;

use common::setup_config_env;

#[test]
fn configured_budget_type_selects_binding_sheet() {
    let (manager, _) = setup_config_env();
    let mut config = manager.load().unwrap();
    assert_eq!(config.budget_type, BudgetType::Rollover);

    let spent = Binding::category(config.budget_type, "2024-05", CellKind::Spent, "food").unwrap();
    assert_eq!(spent.budget, SheetName::EnvelopeBudget);

    config.budget_type = BudgetType::Tracking;
    manager.save(&config).unwrap();
    let reloaded: Config = manager.load().unwrap();
    let spent =
        Binding::category(reloaded.budget_type, "2024-05", CellKind::Spent, "food").unwrap();
    assert_eq!(spent.budget, SheetName::TrackingBudget);
    assert_eq!(spent.key(), "budget202405!sum-amount-food");
}

#[test]
fn cells_receive_updates_for_their_binding_only() {
    let mut sheet = MemorySheet::new();
    let group = Binding::group(BudgetType::Rollover, "2024-05", CellKind::Balance, "usual").unwrap();
    let other = Binding::group(BudgetType::Rollover, "2024-06", CellKind::Balance, "usual").unwrap();
    sheet.set(&group, 12_987);

    let last = Rc::new(Cell::new(0_i64));
    let seen = Rc::clone(&last);
    let sub = sheet.subscribe(&group, Box::new(move |value| seen.set(value)));
    assert_eq!(sub.current, Some(12_987));

    sheet.set(&other, 1);
    assert_eq!(last.get(), 0);
    sheet.set(&group, -42);
    assert_eq!(last.get(), -42);
    assert_eq!(sheet.value(&group), Some(-42));
}
