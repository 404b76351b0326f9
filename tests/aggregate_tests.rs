// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use budgetbuddy::aggregate::{
    BudgetLine, BudgetReport, CATEGORY_TYPES, CategoryTypeMap, aggregate_by_category,
    aggregate_by_type, budget_for_type, category_line, consumption_percentage, difference,
};
use budgetbuddy::models::{Allocation, BudgetConfig, BudgetType, Category, ExpenseDraft, ExpenseRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn expense(id: i64, category: Category, amount: &str) -> ExpenseRecord {
    ExpenseDraft {
        description: format!("e{}", id),
        base_amount: d(amount),
        is_taxable: false,
        tax_rate: Decimal::ZERO,
        category,
        date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        notes: None,
    }
    .into_record(id)
}

fn config(total: &str) -> BudgetConfig {
    BudgetConfig {
        total: d(total),
        ..BudgetConfig::default()
    }
}

#[test]
fn category_table_matches_needs_wants_savings_model() {
    use BudgetType::*;
    let expected = [
        (Category::Food, Needs),
        (Category::Transportation, Needs),
        (Category::Housing, Needs),
        (Category::Entertainment, Wants),
        (Category::Utilities, Needs),
        (Category::Healthcare, Needs),
        (Category::Shopping, Wants),
        (Category::Education, Needs),
        (Category::Travel, Wants),
        (Category::Investments, Savings),
        (Category::Savings, Savings),
        (Category::Other, Wants),
    ];
    for (category, kind) in expected {
        assert_eq!(CATEGORY_TYPES.type_of(category), kind, "{}", category);
    }
}

#[test]
fn unmapped_category_defaults_to_wants() {
    const PARTIAL: [(Category, BudgetType); 1] = [(Category::Food, BudgetType::Needs)];
    let map = CategoryTypeMap::new(&PARTIAL);
    assert_eq!(map.type_of(Category::Housing), BudgetType::Wants);
    assert_eq!(map.type_of(Category::Investments), BudgetType::Wants);

    let mut totals = BTreeMap::new();
    totals.insert(Category::Food, d("10"));
    totals.insert(Category::Savings, d("5"));
    let agg = aggregate_by_type(&totals, &map);
    assert_eq!(agg.totals.needs, d("10"));
    assert_eq!(agg.totals.wants, d("5"));
    assert_eq!(agg.totals.savings, Decimal::ZERO);
    assert_eq!(agg.categories.wants, vec![Category::Savings]);
}

#[test]
fn empty_input_yields_empty_categories_and_zero_types() {
    let totals = aggregate_by_category(&[]);
    assert!(totals.is_empty());

    let agg = aggregate_by_type(&totals, &CATEGORY_TYPES);
    for (_, total) in agg.totals.iter() {
        assert_eq!(*total, Decimal::ZERO);
    }
    for (_, cats) in agg.categories.iter() {
        assert!(cats.is_empty());
    }
}

#[test]
fn category_aggregation_is_a_partition() {
    let expenses = vec![
        expense(1, Category::Food, "12.50"),
        expense(2, Category::Food, "7.25"),
        expense(3, Category::Travel, "300"),
        expense(4, Category::Utilities, "80.10"),
        expense(5, Category::Investments, "0"),
    ];
    let totals = aggregate_by_category(&expenses);
    let sum: Decimal = totals.values().copied().sum();
    let expected: Decimal = expenses.iter().map(|e| e.amount).sum();
    assert_eq!(sum, expected);
    assert_eq!(totals[&Category::Food], d("19.75"));
    assert!(!totals.contains_key(&Category::Housing));
    // A zero-amount expense still creates its category
    assert_eq!(totals[&Category::Investments], Decimal::ZERO);

    let agg = aggregate_by_type(&totals, &CATEGORY_TYPES);
    assert_eq!(agg.totals.needs + agg.totals.wants + agg.totals.savings, sum);
    for (category, _) in &totals {
        let kind = CATEGORY_TYPES.type_of(*category);
        let placed: Vec<BudgetType> = agg
            .categories
            .iter()
            .filter(|(_, cats)| cats.contains(category))
            .map(|(t, _)| t)
            .collect();
        assert_eq!(placed, vec![kind]);
    }
}

#[test]
fn negative_amounts_pass_through_unvalidated() {
    let expenses = vec![
        expense(1, Category::Food, "-5"),
        expense(2, Category::Food, "20"),
    ];
    let totals = aggregate_by_category(&expenses);
    assert_eq!(totals[&Category::Food], d("15"));
}

#[test]
fn budget_for_type_is_zero_without_total() {
    let mut cfg = config("0");
    cfg.allocation = Allocation::new(d("100"), d("0"), d("0"));
    for kind in BudgetType::ALL {
        assert_eq!(budget_for_type(&cfg, kind), Decimal::ZERO);
    }
}

#[test]
fn budget_for_type_is_unrounded() {
    let mut cfg = config("1000.01");
    cfg.allocation = Allocation::new(d("33.3"), d("33.3"), d("33.4"));
    assert_eq!(budget_for_type(&cfg, BudgetType::Needs), d("333.003330"));
}

#[test]
fn consumption_percentage_handles_zero_and_overrun() {
    assert_eq!(consumption_percentage(d("123"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(consumption_percentage(d("-50"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(consumption_percentage(d("1000000"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(consumption_percentage(d("10"), d("-5")), Decimal::ZERO);

    let over = consumption_percentage(d("150"), d("100"));
    assert_eq!(over, d("150"));
    assert!(BudgetLine::new(d("100"), d("150")).is_over_budget());
    assert!(!BudgetLine::new(d("100"), d("100")).is_over_budget());
}

#[test]
fn difference_is_negative_when_over_budget() {
    assert_eq!(difference(d("100"), d("40")), d("60"));
    assert_eq!(difference(d("100"), d("140")), d("-40"));
}

#[test]
fn category_lines_default_missing_values_to_zero() {
    let mut cfg = config("1000");
    cfg.categories.insert(Category::Food, d("150"));
    let mut totals = BTreeMap::new();
    totals.insert(Category::Travel, d("80"));

    let food = category_line(&cfg, &totals, Category::Food);
    assert_eq!(food.budgeted, d("150"));
    assert_eq!(food.actual, Decimal::ZERO);
    assert_eq!(food.percentage, Decimal::ZERO);

    let travel = category_line(&cfg, &totals, Category::Travel);
    assert_eq!(travel.budgeted, Decimal::ZERO);
    assert_eq!(travel.difference, d("-80"));
    assert_eq!(travel.percentage, Decimal::ZERO);
    assert!(travel.is_over_budget());
    assert!(!food.is_over_budget());
}

#[test]
fn standard_split_end_to_end() {
    let expenses = vec![
        expense(1, Category::Food, "200"),
        expense(2, Category::Entertainment, "50"),
        expense(3, Category::Savings, "100"),
    ];
    let cfg = config("1000");

    let totals = aggregate_by_category(&expenses);
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[&Category::Food], d("200"));
    assert_eq!(totals[&Category::Entertainment], d("50"));
    assert_eq!(totals[&Category::Savings], d("100"));

    let agg = aggregate_by_type(&totals, &CATEGORY_TYPES);
    assert_eq!(agg.totals.needs, d("200"));
    assert_eq!(agg.totals.wants, d("50"));
    assert_eq!(agg.totals.savings, d("100"));

    assert_eq!(budget_for_type(&cfg, BudgetType::Needs), d("500"));
    assert_eq!(consumption_percentage(d("200"), d("500")), d("40"));
    assert_eq!(budget_for_type(&cfg, BudgetType::Wants), d("300"));
    assert_eq!(
        consumption_percentage(d("50"), d("300")).round_dp(2),
        d("16.67")
    );
    assert_eq!(budget_for_type(&cfg, BudgetType::Savings), d("200"));
    assert_eq!(consumption_percentage(d("100"), d("200")), d("50"));
}

#[test]
fn report_rows_follow_type_order_with_categories() {
    let expenses = vec![
        expense(1, Category::Travel, "90"),
        expense(2, Category::Food, "200"),
        expense(3, Category::Housing, "700"),
    ];
    let mut cfg = config("1000");
    cfg.categories.insert(Category::Housing, d("600"));
    let report = BudgetReport::build(&expenses, &cfg, &CATEGORY_TYPES);

    let kinds: Vec<(BudgetType, Option<Category>)> = report
        .rows
        .iter()
        .map(|r| (r.budget_type, r.category))
        .collect();
    assert_eq!(kinds[0], (BudgetType::Needs, None));
    assert_eq!(kinds.len(), 3 + 3);
    let wants_pos = kinds
        .iter()
        .position(|k| *k == (BudgetType::Wants, None))
        .unwrap();
    let savings_pos = kinds
        .iter()
        .position(|k| *k == (BudgetType::Savings, None))
        .unwrap();
    assert!(wants_pos < savings_pos);
    assert_eq!(kinds[wants_pos + 1], (BudgetType::Wants, Some(Category::Travel)));

    let needs = report.type_row(BudgetType::Needs).unwrap();
    assert_eq!(needs.line.actual, d("900"));
    assert_eq!(needs.line.budgeted, d("500"));
    assert!(needs.line.is_over_budget());

    let housing = report
        .rows
        .iter()
        .find(|r| r.category == Some(Category::Housing))
        .unwrap();
    assert_eq!(housing.line.difference, d("-100"));
}

#[test]
fn tiny_positive_budget_saturates_percentage() {
    let tiny = Decimal::new(1, 28);
    assert_eq!(consumption_percentage(d("1000000"), tiny), Decimal::MAX);
    assert_eq!(consumption_percentage(d("-1000000"), tiny), Decimal::MIN);

    let line = BudgetLine::new(tiny, d("50"));
    assert_eq!(line.percentage, Decimal::MAX);
    assert!(line.is_over_budget());
}

#[test]
fn maximum_scale_inputs_stay_in_range() {
    let smallest = Decimal::new(1, 28);
    let pct = consumption_percentage(smallest, d("3"));
    assert!(pct >= Decimal::ZERO && pct < d("0.0001"));
    assert_eq!(difference(smallest, smallest), Decimal::ZERO);
}

#[test]
fn sums_and_budgets_saturate_at_decimal_max() {
    let expenses = vec![
        expense(1, Category::Food, "79228162514264337593543950335"),
        expense(2, Category::Food, "79228162514264337593543950335"),
        expense(3, Category::Housing, "1"),
    ];
    let totals = aggregate_by_category(&expenses);
    assert_eq!(totals[&Category::Food], Decimal::MAX);

    let agg = aggregate_by_type(&totals, &CATEGORY_TYPES);
    assert_eq!(agg.totals.needs, Decimal::MAX);

    let mut cfg = BudgetConfig {
        total: Decimal::MAX,
        ..BudgetConfig::default()
    };
    cfg.allocation = Allocation::new(d("100"), d("0"), d("0"));
    assert_eq!(
        budget_for_type(&cfg, BudgetType::Needs),
        Decimal::MAX / Decimal::ONE_HUNDRED
    );
    assert_eq!(difference(Decimal::MIN, Decimal::MAX), Decimal::MIN);
}
