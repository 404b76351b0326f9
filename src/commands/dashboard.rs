// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::CATEGORY_TYPES;
use crate::models::BudgetType;
use crate::store;
use crate::summary::Dashboard;
use crate::utils::{fmt_money, fmt_pct, json_flags, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn build(conn: &Connection) -> Result<Dashboard> {
    let expenses = store::all_expenses(conn)?;
    let income = store::all_income(conn)?;
    let cfg = store::load_budget(conn)?;
    Ok(Dashboard::build(&expenses, &income, &cfg, &CATEGORY_TYPES))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let dash = build(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }
    let ccy = store::get_currency(conn)?;

    println!(
        "{}",
        pretty_table(
            &["Balance", "Total Income", "Total Expenses"],
            vec![vec![
                fmt_money(&dash.balance, &ccy),
                fmt_money(&dash.total_income, &ccy),
                fmt_money(&dash.total_expenses, &ccy),
            ]],
        )
    );

    let mut recent = Vec::new();
    for e in &dash.recent_expenses {
        recent.push(vec![
            e.date.to_string(),
            e.description.clone(),
            e.category.to_string(),
            format!("-{}", fmt_money(&e.amount, &ccy)),
        ]);
    }
    for i in &dash.recent_income {
        recent.push(vec![
            i.date.to_string(),
            i.description.clone(),
            "Income".to_string(),
            format!("+{}", fmt_money(&i.amount, &ccy)),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount"], recent)
    );

    let mut progress = Vec::new();
    for kind in BudgetType::ALL {
        if let Some(row) = dash.budget.type_row(kind) {
            progress.push(vec![
                kind.to_string(),
                fmt_money(&row.line.actual, &ccy),
                fmt_money(&row.line.budgeted, &ccy),
                fmt_pct(&row.line.percentage),
            ]);
        }
    }
    println!(
        "{}",
        pretty_table(&["Type", "Spent", "Budget", "Used"], progress)
    );
    Ok(())
}
