// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::budget_type_of;
use crate::error::BudgetError;
use crate::models::{Category, ExpenseDraft, ExpenseRecord};
use crate::store::{self, ExpenseFilter};
use crate::utils::{
    fmt_money, json_flags, maybe_print_json, opt_arg, parse_amount, parse_date, parse_month,
    pretty_table,
};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let rec = add(conn, sub)?;
            println!(
                "Recorded expense #{}: {} {} on {} ({} / {})",
                rec.id,
                rec.description,
                fmt_money(&rec.amount, &store::get_currency(conn)?),
                rec.date,
                rec.category,
                budget_type_of(rec.category)
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => {
            let rec = edit(conn, sub)?;
            println!("Updated expense #{} (total {})", rec.id, rec.amount);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_expense(conn, id)? {
                println!("Removed expense #{}", id);
            } else {
                println!("No expense #{}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<ExpenseRecord> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let base_amount = parse_amount("amount", sub.get_one::<String>("amount").unwrap())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let is_taxable = sub.get_flag("taxable");
    let tax_rate = parse_amount("tax rate", sub.get_one::<String>("tax_rate").unwrap())?;
    let notes = opt_arg(sub, "notes");

    if description.is_empty() {
        bail!("Description must not be empty");
    }

    store::insert_expense(
        conn,
        ExpenseDraft {
            description,
            base_amount,
            is_taxable,
            tax_rate,
            category,
            date,
            notes,
        },
    )
}

/// Read-modify-write: fields not given on the command line keep their stored
/// value, and the tax totals are derived again from the result.
pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<ExpenseRecord> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let existing =
        store::get_expense(conn, id)?.ok_or(BudgetError::NotFound { kind: "Expense", id })?;
    let mut draft = existing.to_draft();
    if let Some(d) = opt_arg(sub, "date") {
        draft.date = parse_date(&d)?;
    }
    if let Some(d) = opt_arg(sub, "description") {
        draft.description = d;
    }
    if let Some(a) = opt_arg(sub, "amount") {
        draft.base_amount = parse_amount("amount", &a)?;
    }
    if let Some(c) = opt_arg(sub, "category") {
        draft.category = c.parse()?;
    }
    if let Some(t) = sub.get_one::<bool>("taxable") {
        draft.is_taxable = *t;
    }
    if let Some(r) = opt_arg(sub, "tax_rate") {
        draft.tax_rate = parse_amount("tax rate", &r)?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        let n = n.trim();
        draft.notes = (!n.is_empty()).then(|| n.to_string());
    }
    let rec = draft.into_record(id);
    store::update_expense(conn, &rec)?;
    Ok(rec)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let filter = ExpenseFilter {
        month: opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?,
        category: opt_arg(sub, "category")
            .map(|c| c.parse::<Category>())
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    store::list_expenses(conn, &filter)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = store::get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.description.clone(),
                    r.category.to_string(),
                    budget_type_of(r.category).to_string(),
                    fmt_money(&r.amount, &ccy),
                    if r.is_taxable {
                        format!("{}% ({})", r.tax_rate, fmt_money(&r.tax_amount, &ccy))
                    } else {
                        String::new()
                    },
                    r.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Type", "Amount", "Tax", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}
