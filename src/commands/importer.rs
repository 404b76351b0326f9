// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, ExpenseDraft};
use crate::store;
use crate::utils::{parse_amount, parse_date};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => import_expenses(conn, sub).map(|_| ()),
        _ => Ok(()),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" => Ok(true),
        other => bail!("Invalid taxable flag '{}'", other),
    }
}

/// Column positions resolved from the CSV header. `amount` is the pre-tax
/// amount: `base_amount` when present (as written by `export`), else `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    category: usize,
    taxable: Option<usize>,
    tax_rate: Option<usize>,
    notes: Option<usize>,
}

const EXPECTED_HEADER: &str = "date,description,amount,category,taxable,tax_rate,notes";

fn columns(headers: &StringRecord) -> Result<Columns> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let required = |name: &str| {
        find(name).with_context(|| {
            format!(
                "CSV header has no '{}' column (expected {})",
                name, EXPECTED_HEADER
            )
        })
    };
    Ok(Columns {
        date: required("date")?,
        description: required("description")?,
        amount: match find("base_amount") {
            Some(idx) => idx,
            None => required("amount")?,
        },
        category: required("category")?,
        taxable: find("taxable"),
        tax_rate: find("tax_rate"),
        notes: find("notes"),
    })
}

fn field<'r>(rec: &'r StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| rec.get(i)).unwrap_or("").trim()
}

fn parse_row(rec: &StringRecord, cols: &Columns) -> Result<ExpenseDraft> {
    let required = move |idx: usize, name: &str| {
        rec.get(idx)
            .map(str::trim)
            .with_context(|| format!("{} missing", name))
    };
    let date = parse_date(required(cols.date, "date")?)?;
    let description = required(cols.description, "description")?.to_string();
    let base_amount = parse_amount("amount", required(cols.amount, "amount")?)?;
    let category: Category = required(cols.category, "category")?.parse()?;
    let is_taxable = parse_bool(field(rec, cols.taxable))?;
    let rate_raw = field(rec, cols.tax_rate);
    let tax_rate = if rate_raw.is_empty() {
        Decimal::ZERO
    } else {
        parse_amount("tax rate", rate_raw)?
    };
    let notes = Some(field(rec, cols.notes))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    Ok(ExpenseDraft {
        description,
        base_amount,
        is_taxable,
        tax_rate,
        category,
        date,
        notes,
    })
}

/// Imports every row or none of them. Returns the number of rows inserted.
pub fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<usize> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let cols = columns(rdr.headers().with_context(|| format!("Read CSV header of {}", path))?)?;

    let tx = conn.transaction()?;
    let mut count = 0usize;

    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2;
        let rec = result.with_context(|| format!("Read CSV line {}", line))?;
        let draft = parse_row(&rec, &cols).with_context(|| format!("Line {}", line))?;
        store::insert_expense(&tx, draft)?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(count, path, "expenses imported");
    println!("Imported {} expenses from {}", count, path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxable_flag_spellings() {
        for raw in ["", " 0", "false", "No", "n"] {
            assert!(!parse_bool(raw).unwrap(), "{raw:?}");
        }
        for raw in ["1", "TRUE", "yes", "y "] {
            assert!(parse_bool(raw).unwrap(), "{raw:?}");
        }
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn missing_required_column_names_the_expected_header() {
        let headers = StringRecord::from(vec!["id", "when", "amount", "category"]);
        let err = columns(&headers).unwrap_err();
        assert!(err.to_string().contains("no 'date' column"));
        assert!(err.to_string().contains(EXPECTED_HEADER));
    }

    #[test]
    fn exported_header_prefers_base_amount() {
        let headers = StringRecord::from(vec![
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
        ]);
        let cols = columns(&headers).unwrap();
        assert_eq!(cols.date, 1);
        assert_eq!(cols.amount, 4);
        assert_eq!(cols.category, 8);
        assert_eq!(cols.notes, Some(9));
    }

    #[test]
    fn short_row_reports_missing_field() {
        let headers = StringRecord::from(vec!["date", "description", "amount", "category"]);
        let cols = columns(&headers).unwrap();
        let rec = StringRecord::from(vec!["2025-01-01", "Lunch", "12"]);
        let err = parse_row(&rec, &cols).unwrap_err();
        assert!(err.to_string().contains("category missing"));
    }
}
