// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::models::{Category, ExpenseDraft};
use budgetbuddy::tax::{TaxBreakdown, check_tax_consistency, compute_tax};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn draft(base: &str, rate: &str, taxable: bool) -> ExpenseDraft {
    ExpenseDraft {
        description: "Groceries".into(),
        base_amount: d(base),
        is_taxable: taxable,
        tax_rate: d(rate),
        category: Category::Food,
        date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        notes: None,
    }
}

#[test]
fn taxable_amount_adds_tax() {
    assert_eq!(
        compute_tax(d("100"), d("10"), true),
        TaxBreakdown {
            tax_amount: d("10"),
            total_amount: d("110"),
        }
    );
}

#[test]
fn non_taxable_amount_ignores_rate() {
    assert_eq!(
        compute_tax(d("100"), d("10"), false),
        TaxBreakdown {
            tax_amount: Decimal::ZERO,
            total_amount: d("100"),
        }
    );
}

#[test]
fn fractional_rates_are_exact() {
    let t = compute_tax(d("19.99"), d("8.875"), true);
    assert_eq!(t.tax_amount, d("1.7741125"));
    assert_eq!(t.total_amount, d("21.7641125"));
}

#[test]
fn negative_inputs_are_not_clamped() {
    let t = compute_tax(d("-50"), d("10"), true);
    assert_eq!(t.tax_amount, d("-5"));
    assert_eq!(t.total_amount, d("-55"));
}

#[test]
fn draft_records_satisfy_amount_invariant() {
    let taxable = draft("42.50", "7.5", true).into_record(1);
    assert_eq!(taxable.amount, taxable.base_amount + taxable.tax_amount);
    assert!(check_tax_consistency(&taxable).is_none());

    let plain = draft("42.50", "7.5", false).into_record(2);
    assert_eq!(plain.amount, plain.base_amount);
    assert_eq!(plain.tax_amount, Decimal::ZERO);
    assert!(check_tax_consistency(&plain).is_none());
}

#[test]
fn stored_fields_rederive_the_same_totals() {
    let rec = draft("123.45", "13", true).into_record(7);
    let again = compute_tax(rec.base_amount, rec.tax_rate, true);
    assert_eq!(again.tax_amount, rec.tax_amount);
    assert_eq!(again.total_amount, rec.amount);
}

#[test]
fn drift_is_reported_for_edited_totals() {
    let mut rec = draft("100", "10", true).into_record(3);
    rec.amount = d("100");
    let drift = check_tax_consistency(&rec).expect("drift");
    assert_eq!(drift.id, 3);
    assert_eq!(drift.stored.total_amount, d("100"));
    assert_eq!(drift.expected.total_amount, d("110"));

    let mut rec = draft("100", "10", false).into_record(4);
    rec.tax_amount = d("1");
    assert!(check_tax_consistency(&rec).is_some());
}

#[test]
fn largest_decimal_base_saturates() {
    let t = compute_tax(Decimal::MAX, d("10"), true);
    assert_eq!(t.tax_amount, Decimal::MAX / Decimal::ONE_HUNDRED);
    assert_eq!(t.total_amount, Decimal::MAX);

    let t = compute_tax(Decimal::MIN, d("10"), true);
    assert_eq!(t.total_amount, Decimal::MIN);
}

#[test]
fn maximum_scale_base_does_not_overflow() {
    let base = Decimal::new(1, 28);
    let t = compute_tax(base, d("8.875"), true);
    assert!(t.total_amount >= base);
    assert!(t.tax_amount >= Decimal::ZERO);
}
