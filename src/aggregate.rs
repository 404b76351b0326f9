// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget aggregation over a snapshot of expenses.
//!
//! Every function here is pure. Missing map entries read as zero and no
//! intermediate value is rounded. Results that leave the `Decimal` range
//! saturate at `Decimal::MAX` or `Decimal::MIN`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetConfig, BudgetType, Category, ExpenseRecord, PerType};

/// Static lookup from expense category to budget type.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTypeMap<'a> {
    entries: &'a [(Category, BudgetType)],
}

const DEFAULT_ENTRIES: [(Category, BudgetType); 12] = [
    (Category::Food, BudgetType::Needs),
    (Category::Transportation, BudgetType::Needs),
    (Category::Housing, BudgetType::Needs),
    (Category::Entertainment, BudgetType::Wants),
    (Category::Utilities, BudgetType::Needs),
    (Category::Healthcare, BudgetType::Needs),
    (Category::Shopping, BudgetType::Wants),
    (Category::Education, BudgetType::Needs),
    (Category::Travel, BudgetType::Wants),
    (Category::Investments, BudgetType::Savings),
    (Category::Savings, BudgetType::Savings),
    (Category::Other, BudgetType::Wants),
];

pub const CATEGORY_TYPES: CategoryTypeMap<'static> = CategoryTypeMap {
    entries: &DEFAULT_ENTRIES,
};

impl<'a> CategoryTypeMap<'a> {
    pub const fn new(entries: &'a [(Category, BudgetType)]) -> Self {
        CategoryTypeMap { entries }
    }

    /// Unmapped categories fall into `Wants`.
    pub fn type_of(&self, category: Category) -> BudgetType {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, t)| *t)
            .unwrap_or(BudgetType::Wants)
    }

    pub fn entries(&self) -> &'a [(Category, BudgetType)] {
        self.entries
    }
}

pub fn budget_type_of(category: Category) -> BudgetType {
    CATEGORY_TYPES.type_of(category)
}

/// Sums `amount` per category. Categories without expenses are absent.
pub fn aggregate_by_category(expenses: &[ExpenseRecord]) -> BTreeMap<Category, Decimal> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        let total = totals.entry(expense.category).or_insert(Decimal::ZERO);
        *total = total.saturating_add(expense.amount);
    }
    totals
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeAggregate {
    pub totals: PerType<Decimal>,
    pub categories: PerType<Vec<Category>>,
}

pub fn aggregate_by_type(
    category_totals: &BTreeMap<Category, Decimal>,
    map: &CategoryTypeMap<'_>,
) -> TypeAggregate {
    let mut agg = TypeAggregate::default();
    for (category, total) in category_totals {
        let kind = map.type_of(*category);
        let sum = agg.totals.get_mut(kind);
        *sum = sum.saturating_add(*total);
        agg.categories.get_mut(kind).push(*category);
    }
    agg
}

/// `total * allocation[kind] / 100`, unrounded.
pub fn budget_for_type(config: &BudgetConfig, kind: BudgetType) -> Decimal {
    config.total.saturating_mul(*config.allocation.get(kind)) / Decimal::ONE_HUNDRED
}

/// Share of the budget consumed, in percent. Zero when there is no budget;
/// may exceed 100.
pub fn consumption_percentage(actual: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let ratio = actual.checked_div(budgeted).unwrap_or(if actual.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    });
    ratio.saturating_mul(Decimal::ONE_HUNDRED)
}

/// Negative means over budget.
pub fn difference(budgeted: Decimal, actual: Decimal) -> Decimal {
    budgeted.saturating_sub(actual)
}

pub fn category_budget(config: &BudgetConfig, category: Category) -> Decimal {
    config
        .categories
        .get(&category)
        .copied()
        .unwrap_or(Decimal::ZERO)
}

pub fn category_actual(category_totals: &BTreeMap<Category, Decimal>, category: Category) -> Decimal {
    category_totals
        .get(&category)
        .copied()
        .unwrap_or(Decimal::ZERO)
}

/// Budget-vs-actual figures for one row of a budget view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub difference: Decimal,
    pub percentage: Decimal,
}

impl BudgetLine {
    pub fn new(budgeted: Decimal, actual: Decimal) -> Self {
        BudgetLine {
            budgeted,
            actual,
            difference: difference(budgeted, actual),
            percentage: consumption_percentage(actual, budgeted),
        }
    }

    /// Spending above the ceiling, including any spending against a zero ceiling.
    pub fn is_over_budget(&self) -> bool {
        self.difference < Decimal::ZERO
    }
}

pub fn type_line(config: &BudgetConfig, agg: &TypeAggregate, kind: BudgetType) -> BudgetLine {
    BudgetLine::new(budget_for_type(config, kind), *agg.totals.get(kind))
}

pub fn category_line(
    config: &BudgetConfig,
    category_totals: &BTreeMap<Category, Decimal>,
    category: Category,
) -> BudgetLine {
    BudgetLine::new(
        category_budget(config, category),
        category_actual(category_totals, category),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReportRow {
    pub budget_type: BudgetType,
    /// `None` on the type summary row.
    pub category: Option<Category>,
    #[serde(flatten)]
    pub line: BudgetLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReport {
    pub category_totals: BTreeMap<Category, Decimal>,
    pub types: TypeAggregate,
    pub rows: Vec<BudgetReportRow>,
}

impl BudgetReport {
    /// Type rows in Needs, Wants, Savings order, each followed by the
    /// categories that contributed spending to it.
    pub fn build(
        expenses: &[ExpenseRecord],
        config: &BudgetConfig,
        map: &CategoryTypeMap<'_>,
    ) -> Self {
        let category_totals = aggregate_by_category(expenses);
        let types = aggregate_by_type(&category_totals, map);
        let mut rows = Vec::new();
        for kind in BudgetType::ALL {
            rows.push(BudgetReportRow {
                budget_type: kind,
                category: None,
                line: type_line(config, &types, kind),
            });
            for category in types.categories.get(kind) {
                rows.push(BudgetReportRow {
                    budget_type: kind,
                    category: Some(*category),
                    line: category_line(config, &category_totals, *category),
                });
            }
        }
        BudgetReport {
            category_totals,
            types,
            rows,
        }
    }

    pub fn type_row(&self, kind: BudgetType) -> Option<&BudgetReportRow> {
        self.rows
            .iter()
            .find(|r| r.budget_type == kind && r.category.is_none())
    }
}
