//! Single-unknown equation solver
//!
//! A solve binds the parameters of an initial and a final state, forms
//! `f(x) = initial(x) - final(x)` with the unknown substituted, brackets the
//! sign changes of `f` over an exponential grid, refines each bracket with
//! Brent's method and reports the roots in the unknown's unit, rounded to the
//! significant figures of the least precise input.

pub mod roots;

pub use roots::{brentq, find_brackets, search_grid, Bracket};

use crate::config::SolverConfig;
use crate::equation::{EquationSpec, Parameter};
use crate::units::{parse_units, Quantity, Unit, Units};
use crate::{ChemEngError, ChemEngResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Parameter value marking the term to solve for
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Unit expression for reported roots; the equation's own unit when absent
    pub units_out: Option<String>,
    pub config: SolverConfig,
}

impl SolverOptions {
    pub fn with_units_out(units_out: impl Into<String>) -> Self {
        Self {
            units_out: Some(units_out.into()),
            ..Self::default()
        }
    }
}

/// Roots of one solve, in ascending bracket order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub equation: String,
    pub unknown: String,
    pub brackets: Vec<Bracket>,
    pub roots: Vec<Quantity>,
    pub sigfigs: u32,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots: Vec<String> = self.roots.iter().map(|root| root.to_string()).collect();
        write!(f, "{} = {}", self.unknown, roots.join(" or "))
    }
}

#[derive(Debug, Clone)]
pub struct Solver {
    units: Units,
    units_out: Option<String>,
    config: SolverConfig,
    unknown: Option<String>,
    solutions: Vec<Quantity>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverOptions::default())
    }
}

impl Solver {
    pub fn new(options: SolverOptions) -> Self {
        Self {
            units: Units::with_config(options.config.clone()),
            units_out: options.units_out,
            config: options.config,
            unknown: None,
            solutions: Vec::new(),
        }
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut Units {
        &mut self.units
    }

    /// Term solved for by the last successful solve
    pub fn unknown(&self) -> Option<&str> {
        self.unknown.as_deref()
    }

    /// Rounded roots of the last successful solve
    pub fn solutions(&self) -> &[Quantity] {
        &self.solutions
    }

    /// Convert each `"<value> <units>"` to SI, or mark it as the unknown
    pub fn bind_parameters<I, K, V>(
        &mut self,
        parameters: I,
    ) -> ChemEngResult<BTreeMap<String, Parameter>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut bound = BTreeMap::new();
        for (name, value) in parameters {
            let name = name.into();
            let value = value.as_ref().trim();
            let parameter = if value == UNKNOWN {
                Parameter::Unknown
            } else {
                Parameter::Known(self.units.unit_converter(value)?)
            };
            debug!(parameter = %name, ?parameter, "bound parameter");
            bound.insert(name, parameter);
        }
        Ok(bound)
    }

    /// Round to `sigfigs`, or to the session's tracked figures when `None`
    pub fn round_to_sigfigs(&self, quantity: &Quantity, sigfigs: Option<u32>) -> Quantity {
        quantity.round_to_sigfigs(sigfigs.unwrap_or_else(|| self.units.sigfigs()))
    }

    /// Express an SI root in `unit`, convert to the output unit if one was requested, and round
    pub fn add_units(&self, si_value: f64, unit: &Unit) -> ChemEngResult<Quantity> {
        let quantity = Quantity::from_si(si_value, unit);
        let quantity = match &self.units_out {
            Some(units_out) => quantity.to(&parse_units(units_out)?)?,
            None => quantity,
        };
        Ok(self.round_to_sigfigs(&quantity, None))
    }

    pub fn solve(
        &mut self,
        spec: &EquationSpec,
        initial: &BTreeMap<String, Parameter>,
        final_state: &BTreeMap<String, Parameter>,
    ) -> ChemEngResult<Solution> {
        let mut found: Vec<String> = Vec::new();
        for (name, parameter) in initial.iter().chain(final_state.iter()) {
            if *parameter == Parameter::Unknown && !found.contains(name) {
                found.push(name.clone());
            }
        }
        let unknown = match found.as_slice() {
            [single] => single.clone(),
            _ => return Err(ChemEngError::AmbiguousUnknown { found }),
        };
        let unit = spec
            .unit_of(&unknown)
            .cloned()
            .ok_or_else(|| ChemEngError::ContractViolation {
                equation: spec.name.clone(),
                message: format!("unknown '{}' has no unit in the equation", unknown),
            })?;

        // Surface missing parameters before the search swallows them
        spec.evaluate(initial, 0.0)?;
        spec.evaluate(final_state, 0.0)?;

        let residual = |x: f64| match (spec.evaluate(initial, x), spec.evaluate(final_state, x)) {
            (Ok(lhs), Ok(rhs)) => lhs - rhs,
            _ => f64::NAN,
        };

        let brackets = find_brackets(residual, self.config.search_exponent);
        debug!(equation = %spec.name, unknown = %unknown, ?brackets, "bracketed roots");

        let mut roots = Vec::with_capacity(brackets.len());
        for (lo, hi) in &brackets {
            let root = brentq(
                residual,
                *lo,
                *hi,
                self.config.root_xtol,
                self.config.root_rtol,
                self.config.max_root_iterations,
            )?;
            roots.push(self.add_units(root, &unit)?);
        }
        debug!(?roots, sigfigs = self.units.sigfigs(), "refined roots");

        self.unknown = Some(unknown.clone());
        self.solutions = roots.clone();

        Ok(Solution {
            equation: spec.name.clone(),
            unknown,
            brackets,
            roots,
            sigfigs: self.units.sigfigs(),
        })
    }
}
