// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbuddy::commands::doctor::collect_issues;
use budgetbuddy::models::{Allocation, BudgetConfig};
use budgetbuddy::{db, store};

#[test]
fn clean_database_has_no_issues() {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO expenses(description, amount, base_amount, is_taxable, tax_rate, tax_amount, category, date) \
         VALUES ('Shoes', '110', '100', 1, '10', '10', 'Shopping', '2025-01-01')",
        [],
    )
    .unwrap();
    assert!(collect_issues(&conn).unwrap().is_empty());
}

#[test]
fn detects_tax_drift_negative_amounts_and_bad_allocation() {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO expenses(description, amount, base_amount, is_taxable, tax_rate, tax_amount, category, date) VALUES
            ('Shoes', '120', '100', 1, '10', '10', 'Shopping', '2025-01-01');
        INSERT INTO income(description, amount, source, date) VALUES
            ('Chargeback', '-40', 'Other', '2025-01-02');
        "#,
    )
    .unwrap();
    store::save_budget(
        &conn,
        &BudgetConfig {
            allocation: Allocation::new("40".parse().unwrap(), "40".parse().unwrap(), "40".parse().unwrap()),
            ..BudgetConfig::default()
        },
    )
    .unwrap();

    let issues = collect_issues(&conn).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec!["tax_drift", "negative_amount", "allocation_sum"]);
    assert!(issues[0].detail.contains("expense #1"));
    assert!(issues[1].detail.contains("income #1"));
}
