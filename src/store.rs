// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record and budget persistence on SQLite.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::error::BudgetError;
use crate::models::{
    BudgetConfig, Category, ExpenseDraft, ExpenseRecord, IncomeDraft, IncomeRecord, IncomeSource,
};

const BUDGET_KEY: &str = "budget";
const CURRENCY_KEY: &str = "currency";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub month: Option<String>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct IncomeFilter {
    pub month: Option<String>,
    pub source: Option<IncomeSource>,
    pub limit: Option<usize>,
}

fn decimal_col(r: &Row<'_>, idx: usize, what: &str) -> Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

fn date_col(r: &Row<'_>, idx: usize) -> Result<NaiveDate> {
    let s: String = r.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in database", s))
}

const EXPENSE_COLUMNS: &str = "id, description, amount, base_amount, is_taxable, tax_rate, tax_amount, category, date, notes";

fn expense_from_row(r: &Row<'_>) -> Result<ExpenseRecord> {
    let category: String = r.get(7)?;
    Ok(ExpenseRecord {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(r, 2, "amount")?,
        base_amount: decimal_col(r, 3, "base amount")?,
        is_taxable: r.get::<_, i64>(4)? != 0,
        tax_rate: decimal_col(r, 5, "tax rate")?,
        tax_amount: decimal_col(r, 6, "tax amount")?,
        category: category.parse()?,
        date: date_col(r, 8)?,
        notes: r.get(9)?,
    })
}

pub fn insert_expense(conn: &Connection, draft: ExpenseDraft) -> Result<ExpenseRecord> {
    let rec = draft.into_record(0);
    conn.execute(
        "INSERT INTO expenses(description, amount, base_amount, is_taxable, tax_rate, tax_amount, category, date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.description,
            rec.amount.to_string(),
            rec.base_amount.to_string(),
            rec.is_taxable as i64,
            rec.tax_rate.to_string(),
            rec.tax_amount.to_string(),
            rec.category.name(),
            rec.date.to_string(),
            rec.notes,
        ],
    )
    .context("Insert expense")?;
    let rec = ExpenseRecord {
        id: conn.last_insert_rowid(),
        ..rec
    };
    tracing::info!(id = rec.id, amount = %rec.amount, category = %rec.category, "expense created");
    Ok(rec)
}

pub fn get_expense(conn: &Connection, id: i64) -> Result<Option<ExpenseRecord>> {
    let sql = format!("SELECT {} FROM expenses WHERE id=?1", EXPENSE_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => Ok(Some(expense_from_row(r)?)),
        None => Ok(None),
    }
}

/// Replaces every stored field of the record with the given id.
pub fn update_expense(conn: &Connection, rec: &ExpenseRecord) -> Result<()> {
    let n = conn.execute(
        "UPDATE expenses SET description=?1, amount=?2, base_amount=?3, is_taxable=?4, tax_rate=?5,
         tax_amount=?6, category=?7, date=?8, notes=?9 WHERE id=?10",
        params![
            rec.description,
            rec.amount.to_string(),
            rec.base_amount.to_string(),
            rec.is_taxable as i64,
            rec.tax_rate.to_string(),
            rec.tax_amount.to_string(),
            rec.category.name(),
            rec.date.to_string(),
            rec.notes,
            rec.id,
        ],
    )?;
    if n == 0 {
        return Err(BudgetError::NotFound {
            kind: "Expense",
            id: rec.id,
        }
        .into());
    }
    tracing::info!(id = rec.id, "expense updated");
    Ok(())
}

pub fn delete_expense(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    tracing::info!(id, deleted = n, "expense delete");
    Ok(n > 0)
}

pub fn list_expenses(conn: &Connection, filter: &ExpenseFilter) -> Result<Vec<ExpenseRecord>> {
    let mut sql = format!("SELECT {} FROM expenses WHERE 1=1", EXPENSE_COLUMNS);
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(ref month) = filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.clone());
    }
    if let Some(category) = filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(category.name().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(expense_from_row(r)?);
    }
    tracing::debug!(count = out.len(), "expenses loaded");
    Ok(out)
}

pub fn all_expenses(conn: &Connection) -> Result<Vec<ExpenseRecord>> {
    list_expenses(conn, &ExpenseFilter::default())
}

fn income_from_row(r: &Row<'_>) -> Result<IncomeRecord> {
    let source: String = r.get(3)?;
    Ok(IncomeRecord {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(r, 2, "amount")?,
        source: source.parse()?,
        date: date_col(r, 4)?,
        notes: r.get(5)?,
    })
}

pub fn insert_income(conn: &Connection, draft: IncomeDraft) -> Result<IncomeRecord> {
    conn.execute(
        "INSERT INTO income(description, amount, source, date, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.description,
            draft.amount.to_string(),
            draft.source.name(),
            draft.date.to_string(),
            draft.notes,
        ],
    )
    .context("Insert income")?;
    let rec = draft.into_record(conn.last_insert_rowid());
    tracing::info!(id = rec.id, amount = %rec.amount, source = %rec.source, "income created");
    Ok(rec)
}

pub fn get_income(conn: &Connection, id: i64) -> Result<Option<IncomeRecord>> {
    let mut stmt = conn
        .prepare("SELECT id, description, amount, source, date, notes FROM income WHERE id=?1")?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => Ok(Some(income_from_row(r)?)),
        None => Ok(None),
    }
}

pub fn update_income(conn: &Connection, rec: &IncomeRecord) -> Result<()> {
    let n = conn.execute(
        "UPDATE income SET description=?1, amount=?2, source=?3, date=?4, notes=?5 WHERE id=?6",
        params![
            rec.description,
            rec.amount.to_string(),
            rec.source.name(),
            rec.date.to_string(),
            rec.notes,
            rec.id,
        ],
    )?;
    if n == 0 {
        return Err(BudgetError::NotFound {
            kind: "Income",
            id: rec.id,
        }
        .into());
    }
    tracing::info!(id = rec.id, "income updated");
    Ok(())
}

pub fn delete_income(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM income WHERE id=?1", params![id])?;
    tracing::info!(id, deleted = n, "income delete");
    Ok(n > 0)
}

pub fn list_income(conn: &Connection, filter: &IncomeFilter) -> Result<Vec<IncomeRecord>> {
    let mut sql =
        String::from("SELECT id, description, amount, source, date, notes FROM income WHERE 1=1");
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(ref month) = filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.clone());
    }
    if let Some(source) = filter.source {
        sql.push_str(" AND source=?");
        params_vec.push(source.name().to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(income_from_row(r)?);
    }
    tracing::debug!(count = out.len(), "income loaded");
    Ok(out)
}

pub fn all_income(conn: &Connection) -> Result<Vec<IncomeRecord>> {
    list_income(conn, &IncomeFilter::default())
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Returns the stored budget, creating the default one on first use.
/// The allocation is returned as stored, even if it does not sum to 100.
pub fn load_budget(conn: &Connection) -> Result<BudgetConfig> {
    match get_setting(conn, BUDGET_KEY)? {
        Some(json) => serde_json::from_str(&json).context("Stored budget is not valid JSON"),
        None => {
            let config = BudgetConfig::default();
            save_budget(conn, &config)?;
            tracing::info!("default budget created");
            Ok(config)
        }
    }
}

/// Whole-document replace. Callers validate before saving.
pub fn save_budget(conn: &Connection, config: &BudgetConfig) -> Result<()> {
    let json = serde_json::to_string(config)?;
    set_setting(conn, BUDGET_KEY, &json)?;
    tracing::debug!(total = %config.total, "budget saved");
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, CURRENCY_KEY)?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, CURRENCY_KEY, ccy)
}
