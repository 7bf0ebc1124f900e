//! Dimensioned units and quantities
//!
//! A [`Unit`] is a scale (and, for absolute temperature scales, an offset) onto
//! the SI basis plus the signed exponents of the seven SI base dimensions.
//! Multiplying, dividing or raising units combines scales and sums exponents;
//! any combination turns an offset scale into a difference unit.

use crate::{ChemEngError, ChemEngResult};
use serde::Serialize;
use std::fmt;
use std::ops::{Div, Mul};

/// SI base symbols in the order used by [`Dimension`]
pub const BASE_SYMBOLS: [&str; 7] = ["kg", "m", "s", "K", "mol", "A", "cd"];

/// Exponents over (mass, length, time, temperature, amount, current, luminous intensity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Dimension(pub [i32; 7]);

impl Dimension {
    pub const NONE: Dimension = Dimension([0; 7]);
    pub const MASS: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
    pub const LENGTH: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0, 0, 0);
    pub const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 1, 0, 0);
    pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 0, 0, 1, 0);
    pub const LUMINOSITY: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 1);

    pub const fn new(
        mass: i32,
        length: i32,
        time: i32,
        temperature: i32,
        amount: i32,
        current: i32,
        luminosity: i32,
    ) -> Self {
        Dimension([mass, length, time, temperature, amount, current, luminosity])
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Dimension::NONE
    }

    pub fn powi(self, exponent: i32) -> Self {
        Dimension(self.0.map(|e| e * exponent))
    }

    /// `None` when an exponent overflows
    pub fn checked_powi(self, exponent: i32) -> Option<Self> {
        let mut out = [0; 7];
        for (o, e) in out.iter_mut().zip(self.0) {
            *o = e.checked_mul(exponent)?;
        }
        Some(Dimension(out))
    }

    /// `None` when an exponent overflows
    pub fn checked_mul(self, rhs: Dimension) -> Option<Self> {
        let mut out = self.0;
        for (e, r) in out.iter_mut().zip(rhs.0) {
            *e = e.checked_add(r)?;
        }
        Some(Dimension(out))
    }

    pub fn checked_div(self, rhs: Dimension) -> Option<Self> {
        self.checked_mul(rhs.checked_powi(-1)?)
    }

    /// Coherent SI symbol for this dimension, e.g. `kg/m/s^2` for pressure
    pub fn si_symbol(&self) -> String {
        let mut numerator = Vec::new();
        let mut denominator = String::new();
        for (symbol, exponent) in BASE_SYMBOLS.iter().zip(self.0) {
            match exponent {
                0 => {}
                1 => numerator.push(symbol.to_string()),
                e if e > 1 => numerator.push(format!("{}^{}", symbol, e)),
                -1 => denominator.push_str(&format!("/{}", symbol)),
                e => denominator.push_str(&format!("/{}^{}", symbol, -e)),
            }
        }
        if numerator.is_empty() && !denominator.is_empty() {
            format!("1{}", denominator)
        } else {
            format!("{}{}", numerator.join("*"), denominator)
        }
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        let mut out = self.0;
        for (e, r) in out.iter_mut().zip(rhs.0) {
            *e += r;
        }
        Dimension(out)
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self * rhs.powi(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.si_symbol())
    }
}

/// A named unit with its mapping onto SI: `si = value * scale + offset`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub symbol: String,
    pub scale: f64,
    pub offset: f64,
    pub dimension: Dimension,
}

impl Unit {
    pub fn new(symbol: impl Into<String>, scale: f64, dimension: Dimension) -> Self {
        Self {
            symbol: symbol.into(),
            scale,
            offset: 0.0,
            dimension,
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// The multiplicative identity: no symbol, no dimension
    pub fn dimensionless() -> Self {
        Self::new("", 1.0, Dimension::NONE)
    }

    /// Coherent SI unit for a dimension
    pub fn si(dimension: Dimension) -> Self {
        Self::new(dimension.si_symbol(), 1.0, dimension)
    }

    fn is_identity(&self) -> bool {
        self.symbol.is_empty()
            && self.scale == 1.0
            && self.offset == 0.0
            && self.dimension.is_dimensionless()
    }

    pub fn powi(&self, exponent: i32) -> Unit {
        if exponent == 1 {
            return self.clone();
        }
        let symbol = if self.symbol.is_empty() || exponent == 0 {
            String::new()
        } else {
            format!("{}^{}", grouped(&self.symbol), exponent)
        };
        Unit {
            symbol,
            scale: self.scale.powi(exponent),
            offset: 0.0,
            dimension: self.dimension.powi(exponent),
        }
    }

    pub fn to_si_value(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    pub fn from_si_value(&self, si_value: f64) -> f64 {
        (si_value - self.offset) / self.scale
    }
}

fn grouped(symbol: &str) -> String {
    if symbol.contains(['*', '/', '^']) {
        format!("({})", symbol)
    } else {
        symbol.to_string()
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        if self.is_identity() {
            return rhs.clone();
        }
        if rhs.is_identity() {
            return self.clone();
        }
        Unit {
            symbol: format!("{}*{}", self.symbol, rhs.symbol),
            scale: self.scale * rhs.scale,
            offset: 0.0,
            dimension: self.dimension * rhs.dimension,
        }
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        if rhs.is_identity() {
            return self.clone();
        }
        let numerator = if self.symbol.is_empty() {
            "1"
        } else {
            self.symbol.as_str()
        };
        Unit {
            symbol: format!("{}/{}", numerator, grouped(&rhs.symbol)),
            scale: self.scale / rhs.scale,
            offset: 0.0,
            dimension: self.dimension / rhs.dimension,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A magnitude paired with its unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, Unit::dimensionless())
    }

    /// Express an SI magnitude in the given unit
    pub fn from_si(si_value: f64, unit: &Unit) -> Self {
        Self::new(unit.from_si_value(si_value), unit.clone())
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Convert to the coherent SI unit of the same dimension
    pub fn to_si(&self) -> Quantity {
        Quantity::new(
            self.unit.to_si_value(self.value),
            Unit::si(self.unit.dimension),
        )
    }

    /// Convert to another unit of the same dimension
    pub fn to(&self, target: &Unit) -> ChemEngResult<Quantity> {
        if self.unit.dimension != target.dimension {
            return Err(ChemEngError::IncompatibleUnits {
                from: describe(&self.unit),
                to: describe(target),
            });
        }
        Ok(Quantity::from_si(self.unit.to_si_value(self.value), target))
    }

    pub fn powi(&self, exponent: i32) -> Quantity {
        Quantity::new(self.value.powi(exponent), self.unit.powi(exponent))
    }

    pub fn round_to_sigfigs(&self, sigfigs: u32) -> Quantity {
        Quantity::new(
            super::precision::round_to_sigfigs(self.value, sigfigs),
            self.unit.clone(),
        )
    }
}

fn describe(unit: &Unit) -> String {
    if unit.symbol.is_empty() {
        "dimensionless".to_string()
    } else {
        unit.symbol.clone()
    }
}

impl Mul<&Unit> for f64 {
    type Output = Quantity;

    fn mul(self, unit: &Unit) -> Quantity {
        Quantity::new(self, unit.clone())
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.value * rhs.value, &self.unit * &rhs.unit)
    }
}

impl Div for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.value / rhs.value, &self.unit / &rhs.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}
