//! Significant-figure counting and rounding

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

// Decimal keeps 28 fractional digits; outside this band the float path is used instead
const DECIMAL_SAFE_MIN: f64 = 1e-12;
const DECIMAL_SAFE_MAX: f64 = 1e15;

/// Count the significant figures in a numeric literal
///
/// A leading sign and any exponent suffix are ignored. Leading zeros never
/// count; trailing zeros count only when the literal has a decimal point.
/// An all-zero literal counts the digits after its decimal point (at least 1).
pub fn count_sigfigs(literal: &str) -> u32 {
    let unsigned = literal.trim().trim_start_matches(|c: char| c == '+' || c == '-');
    let mantissa = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(position) => &unsigned[..position],
        None => unsigned,
    };

    let has_point = mantissa.contains('.');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.chars().all(|c| c == '0') {
        let decimals = mantissa
            .split_once('.')
            .map(|(_, fraction)| fraction.chars().filter(|c| c.is_ascii_digit()).count())
            .unwrap_or(0);
        return decimals.max(1) as u32;
    }

    let significant = digits.trim_start_matches('0');
    let significant = if has_point {
        significant
    } else {
        significant.trim_end_matches('0')
    };
    significant.len() as u32
}

/// Round to the given number of significant figures
///
/// Zero, non-finite values and a request for zero figures pass through unchanged.
pub fn round_to_sigfigs(value: f64, sigfigs: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || sigfigs == 0 {
        return value;
    }

    let magnitude = value.abs();
    if magnitude > DECIMAL_SAFE_MIN && magnitude < DECIMAL_SAFE_MAX {
        if let Some(rounded) = Decimal::from_f64(value)
            .and_then(|decimal| decimal.round_sf(sigfigs))
            .and_then(|decimal| decimal.to_f64())
        {
            return rounded;
        }
    }

    round_float_to_sigfigs(value, sigfigs)
}

fn round_float_to_sigfigs(value: f64, sigfigs: u32) -> f64 {
    let exponent = sigfigs as i32 - 1 - value.abs().log10().floor() as i32;
    if exponent >= 0 {
        let factor = 10f64.powi(exponent);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-exponent);
        (value / factor).round() * factor
    }
}

/// Round to a fixed number of decimal places
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64(value)
        .map(|decimal| decimal.round_dp(decimals))
        .and_then(|decimal| decimal.to_f64())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(decimals as i32);
            (value * factor).round() / factor
        })
}
