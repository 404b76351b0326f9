// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::BudgetType;

/// Domain errors raised at the input boundary (CLI, import, budget saves).
/// The aggregator and tax calculator never produce these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error(
        "Percentages must add up to 100% (Needs {needs}% + Wants {wants}% + Savings {savings}% = {sum}%)"
    )]
    AllocationSum {
        needs: Decimal,
        wants: Decimal,
        savings: Decimal,
        sum: Decimal,
    },

    #[error("{kind} percentage {value}% is outside 0-100")]
    PercentageOutOfRange { kind: BudgetType, value: Decimal },

    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} {value} is out of range (at most {max} with {max_scale} decimal places)")]
    AmountOutOfRange {
        field: &'static str,
        value: Decimal,
        max: Decimal,
        max_scale: u32,
    },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown income source '{0}'")]
    UnknownSource(String),

    #[error("Unknown budget type '{0}' (use needs|wants|savings)")]
    UnknownBudgetType(String),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },
}

/// Rejects negative values for a named input field.
pub fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<Decimal, BudgetError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(BudgetError::NegativeAmount { field, value });
    }
    Ok(value)
}

/// Largest amount accepted from user input.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000i64)
}

pub const MAX_AMOUNT_SCALE: u32 = 10;

/// Bounds a user-entered amount by sign, magnitude and scale.
pub fn ensure_amount(field: &'static str, value: Decimal) -> Result<Decimal, BudgetError> {
    let value = ensure_non_negative(field, value)?;
    let max = max_amount();
    if value > max || value.scale() > MAX_AMOUNT_SCALE {
        return Err(BudgetError::AmountOutOfRange {
            field,
            value,
            max,
            max_scale: MAX_AMOUNT_SCALE,
        });
    }
    Ok(value)
}
