// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::tax::check_tax_consistency;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

pub fn collect_issues(conn: &Connection) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    // 1) Stored totals that no longer match base amount and tax rate
    let expenses = store::all_expenses(conn)?;
    for e in &expenses {
        if let Some(drift) = check_tax_consistency(e) {
            issues.push(Issue {
                kind: "tax_drift",
                detail: format!(
                    "expense #{}: stored amount {} / tax {}, expected {} / {}",
                    drift.id,
                    drift.stored.total_amount,
                    drift.stored.tax_amount,
                    drift.expected.total_amount,
                    drift.expected.tax_amount
                ),
            });
        }
        if e.amount < Decimal::ZERO {
            issues.push(Issue {
                kind: "negative_amount",
                detail: format!("expense #{}: {}", e.id, e.amount),
            });
        }
    }

    // 2) Income
    for i in store::all_income(conn)? {
        if i.amount < Decimal::ZERO {
            issues.push(Issue {
                kind: "negative_amount",
                detail: format!("income #{}: {}", i.id, i.amount),
            });
        }
    }

    // 3) Allocation written around the save-time check
    let cfg = store::load_budget(conn)?;
    if let Err(e) = cfg.allocation.validate() {
        issues.push(Issue {
            kind: "allocation_sum",
            detail: e.to_string(),
        });
    }

    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = collect_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        tracing::warn!(count = issues.len(), "doctor found issues");
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
