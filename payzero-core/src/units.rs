//! Base-unit conversion.
//!
//! Assets are held as base-unit integers on chain (wei, USDC's 6-decimal
//! units) and shown to the user as decimal strings. Conversion is exact
//! integer math; floats never touch an amount.

use crate::{PayzeroError, Result};

fn pow10(decimals: u32) -> Result<u128> {
    10u128
        .checked_pow(decimals)
        .ok_or_else(|| PayzeroError::validation("unsupported decimal precision"))
}

/// Format a base-unit integer as a human-readable decimal string.
///
/// Trailing zeros in the fractional part are trimmed; a whole amount renders
/// without a decimal point.
pub fn format_units(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    // decimals comes from a ChainConfig, always well within u128 range
    let divisor = pow10(decimals).unwrap_or(u128::MAX);
    let whole = value / divisor;
    let frac = value % divisor;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Parse a decimal amount string into base units.
///
/// Fails with a validation error on empty input, non-digit characters, more
/// fractional digits than the asset supports, or overflow.
pub fn parse_units(amount: &str, decimals: u32) -> Result<u128> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(PayzeroError::validation("Enter amount"));
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(PayzeroError::validation("Invalid amount"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(PayzeroError::validation("Invalid amount"));
    }
    if frac.len() as u32 > decimals {
        return Err(PayzeroError::validation(format!(
            "Amount supports at most {} decimal places",
            decimals
        )));
    }

    let scale = pow10(decimals)?;
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| PayzeroError::validation("Invalid amount"))?
    };

    let mut frac_units: u128 = 0;
    if !frac.is_empty() {
        let frac_value: u128 = frac
            .parse()
            .map_err(|_| PayzeroError::validation("Invalid amount"))?;
        frac_units = frac_value * pow10(decimals - frac.len() as u32)?;
    }

    whole
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(|| PayzeroError::validation("Amount too large"))
}
