// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::tax::compute_tax;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Entertainment,
    Utilities,
    Healthcare,
    Shopping,
    Education,
    Travel,
    Investments,
    Savings,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Travel,
        Category::Investments,
        Category::Savings,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Investments => "Investments",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| BudgetError::UnknownCategory(needle.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    Salary,
    Freelance,
    Business,
    Investments,
    Gifts,
    Other,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 6] = [
        IncomeSource::Salary,
        IncomeSource::Freelance,
        IncomeSource::Business,
        IncomeSource::Investments,
        IncomeSource::Gifts,
        IncomeSource::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IncomeSource::Salary => "Salary",
            IncomeSource::Freelance => "Freelance",
            IncomeSource::Business => "Business",
            IncomeSource::Investments => "Investments",
            IncomeSource::Gifts => "Gifts",
            IncomeSource::Other => "Other",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IncomeSource {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        IncomeSource::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| BudgetError::UnknownSource(needle.to_string()))
    }
}

/// The three buckets of the Needs/Wants/Savings allocation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetType {
    Needs,
    Wants,
    Savings,
}

impl BudgetType {
    pub const ALL: [BudgetType; 3] = [BudgetType::Needs, BudgetType::Wants, BudgetType::Savings];

    pub fn name(self) -> &'static str {
        match self {
            BudgetType::Needs => "Needs",
            BudgetType::Wants => "Wants",
            BudgetType::Savings => "Savings",
        }
    }
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BudgetType {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BudgetType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| BudgetError::UnknownBudgetType(needle.to_string()))
    }
}

/// One value per budget type. Always carries all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerType<T> {
    #[serde(rename = "Needs")]
    pub needs: T,
    #[serde(rename = "Wants")]
    pub wants: T,
    #[serde(rename = "Savings")]
    pub savings: T,
}

impl<T> PerType<T> {
    pub fn get(&self, kind: BudgetType) -> &T {
        match kind {
            BudgetType::Needs => &self.needs,
            BudgetType::Wants => &self.wants,
            BudgetType::Savings => &self.savings,
        }
    }

    pub fn get_mut(&mut self, kind: BudgetType) -> &mut T {
        match kind {
            BudgetType::Needs => &mut self.needs,
            BudgetType::Wants => &mut self.wants,
            BudgetType::Savings => &mut self.savings,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BudgetType, &T)> {
        BudgetType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

/// Percentage of the monthly total assigned to each budget type.
pub type Allocation = PerType<Decimal>;

impl Allocation {
    pub fn new(needs: Decimal, wants: Decimal, savings: Decimal) -> Self {
        PerType {
            needs,
            wants,
            savings,
        }
    }

    /// The 50/30/20 rule.
    pub fn standard() -> Self {
        Allocation::new(Decimal::from(50), Decimal::from(30), Decimal::from(20))
    }

    pub fn sum(&self) -> Decimal {
        self.needs + self.wants + self.savings
    }

    /// Each percentage within 0-100 and the three summing to exactly 100.
    pub fn validate(&self) -> Result<(), BudgetError> {
        let hundred = Decimal::ONE_HUNDRED;
        for (kind, value) in self.iter() {
            if *value < Decimal::ZERO || *value > hundred {
                return Err(BudgetError::PercentageOutOfRange {
                    kind,
                    value: *value,
                });
            }
        }
        let sum = self.sum();
        if sum != hundred {
            return Err(BudgetError::AllocationSum {
                needs: self.needs,
                wants: self.wants,
                savings: self.savings,
                sum,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub total: Decimal,
    pub allocation: Allocation,
    #[serde(default)]
    pub categories: BTreeMap<Category, Decimal>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        BudgetConfig {
            total: Decimal::ZERO,
            allocation: Allocation::standard(),
            categories: BTreeMap::new(),
        }
    }
}

impl BudgetConfig {
    /// Checks run before a config is persisted. Never applied on read.
    pub fn validate(&self) -> Result<(), BudgetError> {
        crate::error::ensure_amount("budget total", self.total)?;
        for value in self.categories.values() {
            crate::error::ensure_amount("category budget", *value)?;
        }
        self.allocation.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub base_amount: Decimal,
    pub is_taxable: bool,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl ExpenseRecord {
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            base_amount: self.base_amount,
            is_taxable: self.is_taxable,
            tax_rate: self.tax_rate,
            category: self.category,
            date: self.date,
            notes: self.notes.clone(),
        }
    }
}

/// User-entered expense fields before tax derivation and id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub base_amount: Decimal,
    pub is_taxable: bool,
    pub tax_rate: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl ExpenseDraft {
    pub fn into_record(self, id: i64) -> ExpenseRecord {
        let tax = compute_tax(self.base_amount, self.tax_rate, self.is_taxable);
        ExpenseRecord {
            id,
            description: self.description,
            amount: tax.total_amount,
            base_amount: self.base_amount,
            is_taxable: self.is_taxable,
            tax_rate: self.tax_rate,
            tax_amount: tax.tax_amount,
            category: self.category,
            date: self.date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub source: IncomeSource,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeDraft {
    pub description: String,
    pub amount: Decimal,
    pub source: IncomeSource,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl IncomeDraft {
    pub fn into_record(self, id: i64) -> IncomeRecord {
        IncomeRecord {
            id,
            description: self.description,
            amount: self.amount,
            source: self.source,
            date: self.date,
            notes: self.notes,
        }
    }
}

impl IncomeRecord {
    pub fn to_draft(&self) -> IncomeDraft {
        IncomeDraft {
            description: self.description.clone(),
            amount: self.amount,
            source: self.source,
            date: self.date,
            notes: self.notes.clone(),
        }
    }
}
