// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{BudgetReport, CATEGORY_TYPES, budget_for_type};
use crate::models::{Allocation, BudgetConfig, Category};
use crate::store::{self, ExpenseFilter};
use crate::utils::{
    fmt_money, fmt_pct, json_flags, maybe_print_json, opt_arg, parse_amount, parse_decimal,
    parse_month, pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => {
            let total = parse_amount("budget total", sub.get_one::<String>("total").unwrap())?;
            let cfg = update(conn, |cfg| cfg.total = total)?;
            println!("Monthly budget set to {}", fmt_money(&cfg.total, &store::get_currency(conn)?));
        }
        Some(("allocate", sub)) => {
            let alloc = Allocation::new(
                parse_decimal(sub.get_one::<String>("needs").unwrap())?,
                parse_decimal(sub.get_one::<String>("wants").unwrap())?,
                parse_decimal(sub.get_one::<String>("savings").unwrap())?,
            );
            let cfg = update(conn, |cfg| cfg.allocation = alloc)?;
            println!(
                "Allocation set to Needs {}% / Wants {}% / Savings {}%",
                cfg.allocation.needs, cfg.allocation.wants, cfg.allocation.savings
            );
        }
        Some(("reset", _)) => {
            update(conn, |cfg| cfg.allocation = Allocation::standard())?;
            println!("Allocation reset to 50/30/20");
        }
        Some(("category", sub)) => {
            let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
            let amount = parse_amount("category budget", sub.get_one::<String>("amount").unwrap())?;
            update(conn, |cfg| {
                cfg.categories.insert(category, amount);
            })?;
            println!(
                "Budget for {} set to {}",
                category,
                fmt_money(&amount, &store::get_currency(conn)?)
            );
        }
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Loads the whole config, applies `edit`, validates, and saves the whole
/// config back. Nothing is written when validation fails.
pub fn update(conn: &Connection, edit: impl FnOnce(&mut BudgetConfig)) -> Result<BudgetConfig> {
    let mut cfg = store::load_budget(conn)?;
    edit(&mut cfg);
    if let Err(e) = cfg.validate() {
        tracing::warn!(error = %e, "budget change rejected");
        return Err(e).context("Budget not saved");
    }
    store::save_budget(conn, &cfg)?;
    Ok(cfg)
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let cfg = store::load_budget(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &cfg)? {
        return Ok(());
    }
    let ccy = store::get_currency(conn)?;
    println!("Total monthly budget: {}", fmt_money(&cfg.total, &ccy));
    let rows: Vec<Vec<String>> = cfg
        .allocation
        .iter()
        .map(|(kind, pct)| {
            vec![
                kind.to_string(),
                format!("{}%", pct),
                fmt_money(&budget_for_type(&cfg, kind), &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Type", "Allocation", "Budget"], rows));

    let rows: Vec<Vec<String>> = CATEGORY_TYPES
        .entries()
        .iter()
        .map(|(category, kind)| {
            vec![
                category.to_string(),
                kind.to_string(),
                fmt_money(&crate::aggregate::category_budget(&cfg, *category), &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Type", "Budget"], rows));
    Ok(())
}

pub fn build_report(conn: &Connection, month: Option<String>) -> Result<BudgetReport> {
    let cfg = store::load_budget(conn)?;
    let expenses = store::list_expenses(
        conn,
        &ExpenseFilter {
            month,
            ..Default::default()
        },
    )?;
    Ok(BudgetReport::build(&expenses, &cfg, &CATEGORY_TYPES))
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let month = opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?;
    let report = build_report(conn, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &report.rows)? {
        return Ok(());
    }
    let ccy = store::get_currency(conn)?;
    let data: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            let label = match row.category {
                Some(c) => format!("  {}", c),
                None => row.budget_type.to_string(),
            };
            vec![
                label,
                row.budget_type.to_string(),
                fmt_money(&row.line.budgeted, &ccy),
                fmt_money(&row.line.actual, &ccy),
                fmt_money(&row.line.difference, &ccy),
                fmt_pct(&row.line.percentage),
                if row.line.is_over_budget() {
                    "OVER".to_string()
                } else {
                    "ok".to_string()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Type", "Budget", "Actual", "Difference", "Progress", "Status"],
            data
        )
    );
    Ok(())
}
