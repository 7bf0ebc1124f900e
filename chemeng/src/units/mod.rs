//! Unit parsing and conversion
//!
//! [`Units`] turns free-form `"<value> <units>"` strings into SI quantities and
//! keeps track of the smallest number of significant figures seen across every
//! value it has parsed, so results can be reported no more precisely than the
//! least precise input.

pub mod precision;
pub mod quantity;
pub mod table;

pub use precision::{count_sigfigs, round_to_decimals, round_to_sigfigs};
pub use quantity::{Dimension, Quantity, Unit, BASE_SYMBOLS};
pub use table::{resolve_unit, STANDARD_GRAVITY};

use crate::config::SolverConfig;
use crate::{ChemEngError, ChemEngResult};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static VALUE_UNITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)\s+([A-Za-z0-9\s*/^()\-]+?)\s*$",
    )
    .expect("value/units pattern is valid")
});

/// Unit parser with a running significant-figure tracker
#[derive(Debug, Clone)]
pub struct Units {
    max_sigfigs: u32,
    sigfigs: u32,
    config: SolverConfig,
}

impl Default for Units {
    fn default() -> Self {
        Self::new()
    }
}

impl Units {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_max_sigfigs(max_sigfigs: u32) -> Self {
        Self::with_config(SolverConfig::with_max_sigfigs(max_sigfigs))
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            max_sigfigs: config.max_sigfigs,
            sigfigs: config.max_sigfigs,
            config,
        }
    }

    /// Fewest significant figures seen so far, capped at the ceiling
    pub fn sigfigs(&self) -> u32 {
        self.sigfigs
    }

    pub fn max_sigfigs(&self) -> u32 {
        self.max_sigfigs
    }

    /// Count the significant figures of a literal and fold them into the running minimum
    pub fn count_sigfigs(&mut self, literal: &str) -> u32 {
        let count = count_sigfigs(literal);
        self.sigfigs = self.sigfigs.min(count);
        count
    }

    /// Split `"<value> <units>"` into the numeric value and the unit expression
    pub fn split_value_and_units(&mut self, input: &str) -> ChemEngResult<(f64, String)> {
        self.config.check_input_size(input)?;

        let captures = VALUE_UNITS
            .captures(input)
            .ok_or_else(|| ChemEngError::malformed_quantity(input))?;
        let literal = &captures[1];
        let units = captures[2].to_string();

        let value = literal
            .parse::<f64>()
            .map_err(|_| ChemEngError::malformed_quantity(input))?;
        let counted = self.count_sigfigs(literal);
        trace!(literal, counted, sigfigs = self.sigfigs, "parsed value");

        Ok((value, units))
    }

    /// Parse and convert to the SI magnitude
    pub fn unit_converter(&mut self, input: &str) -> ChemEngResult<f64> {
        Ok(self.convert_quantity(input)?.value)
    }

    /// Parse and convert to a quantity in coherent SI units
    pub fn convert_quantity(&mut self, input: &str) -> ChemEngResult<Quantity> {
        let (value, units) = self.split_value_and_units(input)?;
        let unit = parse_units(&units)?;
        finite(input, (value * &unit).to_si())
    }

    /// Parse and convert to the given target unit expression
    pub fn convert_to(&mut self, input: &str, target: &str) -> ChemEngResult<Quantity> {
        let (value, units) = self.split_value_and_units(input)?;
        let unit = parse_units(&units)?;
        let target = parse_units(target)?;
        finite(input, (value * &unit).to(&target)?)
    }

    /// Round a quantity to the tracked significant figures
    pub fn round(&self, quantity: &Quantity) -> Quantity {
        quantity.round_to_sigfigs(self.sigfigs)
    }
}

fn finite(input: &str, quantity: Quantity) -> ChemEngResult<Quantity> {
    if quantity.value.is_finite() {
        Ok(quantity)
    } else {
        Err(ChemEngError::malformed(
            input,
            "a quantity whose converted magnitude is finite",
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum UnitOperator {
    Multiply,
    Divide,
}

struct UnitToken<'a> {
    operator: UnitOperator,
    symbol: &'a str,
    exponent: i32,
    consumed: usize,
}

/// Resolve a compound unit expression such as `kg/m**3` or `ft*lbf/s^2`
pub fn parse_units(units: &str) -> ChemEngResult<Unit> {
    let normalized: String = units
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace("**", "^");

    let mut result = Unit::dimensionless();
    let mut remaining = normalized.as_str();

    while !remaining.is_empty() {
        let token = next_token(remaining).ok_or_else(|| ChemEngError::CannotBuildUnits {
            unit: next_letter_run(remaining).unwrap_or(remaining).to_string(),
            remaining: remaining.to_string(),
        })?;

        let resolved = resolve_unit(token.symbol)?;
        let dimension = resolved
            .dimension
            .checked_powi(token.exponent)
            .and_then(|dimension| match token.operator {
                UnitOperator::Multiply => result.dimension.checked_mul(dimension),
                UnitOperator::Divide => result.dimension.checked_div(dimension),
            });
        if dimension.is_none() {
            return Err(ChemEngError::CannotBuildUnits {
                unit: token.symbol.to_string(),
                remaining: remaining.to_string(),
            });
        }

        let base = resolved.powi(token.exponent);
        result = match token.operator {
            UnitOperator::Multiply => &result * &base,
            UnitOperator::Divide => &result / &base,
        };
        remaining = &remaining[token.consumed..];
    }

    if !result.scale.is_finite() || result.scale == 0.0 {
        return Err(ChemEngError::malformed(
            units,
            "a unit expression whose scale onto SI is finite and non-zero",
        ));
    }

    Ok(result)
}

fn next_token(input: &str) -> Option<UnitToken<'_>> {
    let (operator, mut position) = match input.as_bytes().first() {
        Some(b'*') => (UnitOperator::Multiply, 1),
        Some(b'/') => (UnitOperator::Divide, 1),
        _ => (UnitOperator::Multiply, 0),
    };

    let letters = input[position..]
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if letters == 0 {
        return None;
    }
    let symbol = &input[position..position + letters];
    position += letters;

    let rest = &input[position..];
    let (exponent, exponent_len) = if let Some(after_caret) = rest.strip_prefix('^') {
        let (exponent, len) = leading_integer(after_caret)?;
        (exponent, len + 1)
    } else {
        leading_integer(rest).unwrap_or((1, 0))
    };

    Some(UnitToken {
        operator,
        symbol,
        exponent,
        consumed: position + exponent_len,
    })
}

fn leading_integer(input: &str) -> Option<(i32, usize)> {
    let sign_len = usize::from(input.starts_with(['-', '+']));
    let digits = input[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let len = sign_len + digits;
    input[..len].parse().ok().map(|exponent| (exponent, len))
}

fn next_letter_run(input: &str) -> Option<&str> {
    let start = input.find(|c: char| c.is_ascii_alphabetic())?;
    let len = input[start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    Some(&input[start..start + len])
}
