// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

fn parse_format(sub: &clap::ArgMatches) -> Result<Format> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    match fmt.as_str() {
        "csv" => Ok(Format::Csv),
        "json" => Ok(Format::Json),
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        Some(("income", sub)) => export_income(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = parse_format(sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let mut rows = store::all_expenses(conn)?;
    rows.sort_by_key(|e| (e.date, e.id));

    match fmt {
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "amount",
                "base_amount",
                "taxable",
                "tax_rate",
                "tax_amount",
                "category",
                "notes",
            ])?;
            for e in &rows {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    e.amount.to_string(),
                    e.base_amount.to_string(),
                    e.is_taxable.to_string(),
                    e.tax_rate.to_string(),
                    e.tax_amount.to_string(),
                    e.category.to_string(),
                    e.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date.to_string(), "description": e.description,
                        "amount": e.amount.to_string(), "base_amount": e.base_amount.to_string(),
                        "taxable": e.is_taxable, "tax_rate": e.tax_rate.to_string(),
                        "tax_amount": e.tax_amount.to_string(), "category": e.category.name(),
                        "notes": e.notes
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    tracing::info!(count = rows.len(), path = out, "expenses exported");
    println!("Exported {} expenses to {}", rows.len(), out);
    Ok(())
}

fn export_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = parse_format(sub)?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let mut rows = store::all_income(conn)?;
    rows.sort_by_key(|i| (i.date, i.id));

    match fmt {
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["id", "date", "description", "amount", "source", "notes"])?;
            for i in &rows {
                wtr.write_record([
                    i.id.to_string(),
                    i.date.to_string(),
                    i.description.clone(),
                    i.amount.to_string(),
                    i.source.to_string(),
                    i.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|i| {
                    json!({
                        "id": i.id, "date": i.date.to_string(), "description": i.description,
                        "amount": i.amount.to_string(), "source": i.source.name(), "notes": i.notes
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    tracing::info!(count = rows.len(), path = out, "income exported");
    println!("Exported {} income records to {}", rows.len(), out);
    Ok(())
}
