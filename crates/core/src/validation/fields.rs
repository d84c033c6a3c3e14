//! Per-value checks shared by every product type.
//!
//! Each check returns the parsed value or the first [`Violation`] in rule
//! order: required, shape, range.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use validator::ValidateLength;

use super::{REQUIRED, WRONG_TYPE};
use crate::factory::to_column_scale;

/// Column width of `products.sku` and `products.name`.
pub const MAX_TEXT_LEN: u64 = 255;

/// Largest value a `NUMERIC(10, 2)` column holds: 99999999.99.
pub const MAX_DECIMAL: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Required,
    WrongType,
    TooLong,
    TooLarge,
    Negative,
}

impl Violation {
    pub(crate) fn message(self, label: &str) -> String {
        match self {
            Violation::Required => REQUIRED.to_string(),
            Violation::WrongType => WRONG_TYPE.to_string(),
            Violation::TooLong => format!("{label} must be at most {MAX_TEXT_LEN} characters"),
            Violation::TooLarge => format!("{label} must be at most {MAX_DECIMAL}"),
            Violation::Negative => format!("{label} cannot be negative"),
        }
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Required, non-empty string. Returned trimmed.
pub(crate) fn text(value: Option<&Value>) -> Result<String, Violation> {
    if is_missing(value) {
        return Err(Violation::Required);
    }
    let Some(Value::String(s)) = value else {
        return Err(Violation::WrongType);
    };
    let trimmed = s.trim().to_string();
    if !trimmed.validate_length(None, Some(MAX_TEXT_LEN), None) {
        return Err(Violation::TooLong);
    }
    Ok(trimmed)
}

/// Required, non-negative decimal given as a JSON number or numeric string.
/// Must fit a `NUMERIC(10, 2)` column once rounded to two places.
pub(crate) fn decimal(value: Option<&Value>) -> Result<Decimal, Violation> {
    if is_missing(value) {
        return Err(Violation::Required);
    }
    let parsed = match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    }
    .ok_or(Violation::WrongType)?;

    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(Violation::Negative);
    }
    if to_column_scale(parsed) > MAX_DECIMAL {
        return Err(Violation::TooLarge);
    }
    Ok(parsed)
}

/// Required, non-negative whole number that fits an `INTEGER` column.
pub(crate) fn integer(value: Option<&Value>) -> Result<i32, Violation> {
    if is_missing(value) {
        return Err(Violation::Required);
    }
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or(Violation::WrongType)?;

    if parsed < 0 {
        return Err(Violation::Negative);
    }
    i32::try_from(parsed).map_err(|_| Violation::WrongType)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
