// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::ensure_amount;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parses a user-entered amount. Rejects negatives and values outside the
/// accepted magnitude and scale.
pub fn parse_amount(field: &'static str, s: &str) -> Result<Decimal> {
    let v = parse_decimal(s)?;
    Ok(ensure_amount(field, v)?)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

/// Whole percent, as shown on progress bars.
pub fn fmt_pct(d: &Decimal) -> String {
    format!("{}%", d.round_dp(0))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Reads an optional string argument, trimmed, with empty treated as absent.
pub fn opt_arg(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn json_flags(m: &clap::ArgMatches) -> (bool, bool) {
    (m.get_flag("json"), m.get_flag("jsonl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_and_percent_round_only_for_display() {
        let pct: Decimal = "16.666666".parse().unwrap();
        assert_eq!(fmt_pct(&pct), "17%");
        let amt: Decimal = "217.749".parse().unwrap();
        assert_eq!(fmt_money(&amt, "EUR"), "EUR 217.75");
        assert_eq!(fmt_money(&Decimal::from(5), "USD"), "USD 5.00");
    }

    #[test]
    fn month_and_amount_parsing() {
        assert_eq!(parse_month(" 2025-02 ").unwrap(), "2025-02");
        assert!(parse_month("2025-13").is_err());
        assert!(parse_amount("amount", "-0.01").is_err());
        assert_eq!(parse_amount("amount", "0").unwrap(), Decimal::ZERO);
    }
}
