// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BudgetError;
use crate::models::{IncomeDraft, IncomeRecord, IncomeSource};
use crate::store::{self, IncomeFilter};
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
                "Recorded income #{}: {} {} on {} ({})",
                rec.id,
                rec.description,
                fmt_money(&rec.amount, &store::get_currency(conn)?),
                rec.date,
                rec.source
            );
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => {
            let rec = edit(conn, sub)?;
            println!("Updated income #{}", rec.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if store::delete_income(conn, id)? {
                println!("Removed income #{}", id);
            } else {
                println!("No income #{}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<IncomeRecord> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_amount("amount", sub.get_one::<String>("amount").unwrap())?;
    let source: IncomeSource = sub.get_one::<String>("source").unwrap().parse()?;
    if description.is_empty() {
        bail!("Description must not be empty");
    }
    store::insert_income(
        conn,
        IncomeDraft {
            description,
            amount,
            source,
            date,
            notes: opt_arg(sub, "notes"),
        },
    )
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<IncomeRecord> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let existing =
        store::get_income(conn, id)?.ok_or(BudgetError::NotFound { kind: "Income", id })?;
    let mut draft = existing.to_draft();
    if let Some(d) = opt_arg(sub, "date") {
        draft.date = parse_date(&d)?;
    }
    if let Some(d) = opt_arg(sub, "description") {
        draft.description = d;
    }
    if let Some(a) = opt_arg(sub, "amount") {
        draft.amount = parse_amount("amount", &a)?;
    }
    if let Some(s) = opt_arg(sub, "source") {
        draft.source = s.parse()?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        let n = n.trim();
        draft.notes = (!n.is_empty()).then(|| n.to_string());
    }
    let rec = draft.into_record(id);
    store::update_income(conn, &rec)?;
    Ok(rec)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<IncomeRecord>> {
    let filter = IncomeFilter {
        month: opt_arg(sub, "month").map(|m| parse_month(&m)).transpose()?,
        source: opt_arg(sub, "source")
            .map(|s| s.parse::<IncomeSource>())
            .transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };
    store::list_income(conn, &filter)
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
                    r.source.to_string(),
                    fmt_money(&r.amount, &ccy),
                    r.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Source", "Amount", "Notes"], rows)
        );
    }
    Ok(())
}
