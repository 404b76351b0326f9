// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{aggregate_by_category, budget_type_of};
use crate::models::Category;
use crate::store::{self, ExpenseFilter};
use crate::summary::{CashflowMonth, monthly_cashflow};
use crate::utils::{fmt_money, json_flags, maybe_print_json, opt_arg, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategorySpend {
    pub category: Category,
    pub budget_type: crate::models::BudgetType,
    pub spent: Decimal,
}

/// Category totals, largest first.
pub fn category_spend(conn: &Connection, month: Option<String>) -> Result<Vec<CategorySpend>> {
    let expenses = store::list_expenses(
        conn,
        &ExpenseFilter {
            month,
            ..Default::default()
        },
    )?;
    let mut items: Vec<CategorySpend> = aggregate_by_category(&expenses)
        .into_iter()
        .map(|(category, spent)| CategorySpend {
            category,
            budget_type: budget_type_of(category),
            spent,
        })
        .collect();
    items.sort_by(|a, b| b.spent.cmp(&a.spent));
    Ok(items)
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let month = opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?;
    let items = category_spend(conn, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &items)? {
        let ccy = store::get_currency(conn)?;
        let data = items
            .iter()
            .map(|i| {
                vec![
                    i.category.to_string(),
                    i.budget_type.to_string(),
                    fmt_money(&i.spent, &ccy),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Type", "Spent"], data));
    }
    Ok(())
}

pub fn cashflow_rows(conn: &Connection, months: usize) -> Result<Vec<CashflowMonth>> {
    let expenses = store::all_expenses(conn)?;
    let income = store::all_income(conn)?;
    Ok(monthly_cashflow(&expenses, &income, months))
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let data = cashflow_rows(conn, months)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = store::get_currency(conn)?;
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.month.clone(),
                    fmt_money(&c.income, &ccy),
                    fmt_money(&c.expenses, &ccy),
                    fmt_money(&c.net, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}
