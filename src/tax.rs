// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Tax-inclusive totals for a single expense entry.
//!
//! Inputs are not clamped or rejected here; validation belongs to the caller.
//! Out-of-range products saturate instead of panicking.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ExpenseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

pub fn compute_tax(base_amount: Decimal, tax_rate: Decimal, is_taxable: bool) -> TaxBreakdown {
    if !is_taxable {
        return TaxBreakdown {
            tax_amount: Decimal::ZERO,
            total_amount: base_amount,
        };
    }
    let tax_amount = base_amount.saturating_mul(tax_rate) / Decimal::ONE_HUNDRED;
    TaxBreakdown {
        tax_amount,
        total_amount: base_amount.saturating_add(tax_amount),
    }
}

/// A stored expense whose tax fields no longer agree with its base amount and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxDrift {
    pub id: i64,
    pub stored: TaxBreakdown,
    pub expected: TaxBreakdown,
}

/// Re-derives the totals from the stored base amount and rate.
/// Returns `None` when the record is consistent.
pub fn check_tax_consistency(record: &ExpenseRecord) -> Option<TaxDrift> {
    let expected = compute_tax(record.base_amount, record.tax_rate, record.is_taxable);
    let stored = TaxBreakdown {
        tax_amount: record.tax_amount,
        total_amount: record.amount,
    };
    if stored == expected {
        None
    } else {
        Some(TaxDrift {
            id: record.id,
            stored,
            expected,
        })
    }
}
