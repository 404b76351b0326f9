// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{BudgetReport, CategoryTypeMap};
use crate::models::{BudgetConfig, ExpenseRecord, IncomeRecord};

pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub recent_expenses: Vec<ExpenseRecord>,
    pub recent_income: Vec<IncomeRecord>,
    pub budget: BudgetReport,
}

impl Dashboard {
    pub fn build(
        expenses: &[ExpenseRecord],
        income: &[IncomeRecord],
        config: &BudgetConfig,
        map: &CategoryTypeMap<'_>,
    ) -> Self {
        let total_expenses = saturating_sum(expenses.iter().map(|e| e.amount));
        let total_income = saturating_sum(income.iter().map(|i| i.amount));
        Dashboard {
            total_income,
            total_expenses,
            balance: total_income.saturating_sub(total_expenses),
            recent_expenses: recent(expenses, RECENT_LIMIT, |e| (e.date, e.id)),
            recent_income: recent(income, RECENT_LIMIT, |i| (i.date, i.id)),
            budget: BudgetReport::build(expenses, config, map),
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Newest first by `key`, truncated to `limit`.
pub fn recent<T: Clone, K: Ord>(items: &[T], limit: usize, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted.truncate(limit);
    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashflowMonth {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Income and expense totals per `YYYY-MM`, newest month first.
pub fn monthly_cashflow(
    expenses: &[ExpenseRecord],
    income: &[IncomeRecord],
    months: usize,
) -> Vec<CashflowMonth> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for i in income {
        let month = i.date.format("%Y-%m").to_string();
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 = entry.0.saturating_add(i.amount);
    }
    for e in expenses {
        let month = e.date.format("%Y-%m").to_string();
        let entry = map.entry(month).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.1 = entry.1.saturating_add(e.amount);
    }
    map.into_iter()
        .rev()
        .take(months)
        .map(|(month, (inc, exp))| CashflowMonth {
            month,
            income: inc,
            expenses: exp,
            net: inc.saturating_sub(exp),
        })
        .collect()
}
