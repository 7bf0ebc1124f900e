//! # chemeng
//!
//! **Unit-safe answers to everyday chemical engineering problems**
//!
//! chemeng parses physical quantities written the way engineers write them
//! (`"14.6959 psi"`, `"62.423 lb/ft**3"`), balances chemical equations, and
//! solves single-unknown physical equations such as Bernoulli's by numerical
//! root finding.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chemeng::{ChemEngResult, Fluids, SolverOptions, Stoichiometry, Units};
//!
//! fn main() -> ChemEngResult<()> {
//!     // Quantities are converted to SI
//!     let mut units = Units::new();
//!     let g = units.unit_converter("32.174 ft/s**2")?;
//!
//!     // Coefficients are the smallest that conserve every element
//!     let reaction = Stoichiometry::new("CH4 + O2 --> CO2 + H2O")?;
//!     assert_eq!(reaction.result, "CH4 + 2.0 O2 --> CO2 + 2.0 H2O");
//!
//!     // Exactly one parameter is "unknown"
//!     let mut fluids = Fluids::new(
//!         [("v", "0.0000 ft/s"), ("h", "10.000 yard"), ("P", "14.6959 psi"), ("rho", "998.87 kg/m**3")],
//!         [("v", "unknown"), ("h", "3.00123 m"), ("P", "101325 pascal"), ("rho", "62.423 lb/ft**3")],
//!         SolverOptions::with_units_out("m/s"),
//!     )?;
//!     println!("{}", fluids.bernoulli()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Significant figures
//! Every parsed value folds its significant figures into a running minimum;
//! solver results are rounded to that minimum so answers are never reported
//! more precisely than the least precise input.
//!
//! ### Equation families
//! An equation is a template such as `0.5 * {rho} * {v} ** 2 + {P}` plus the
//! unit of each `{term}`. Families implement [`EquationFamily`] and are
//! validated once by [`EquationSpec::compile`].

pub mod config;
pub mod equation;
pub mod error;
pub mod fluids;
pub mod solver;
pub mod stoichiometry;
pub mod units;

pub use config::SolverConfig;
pub use equation::{EquationFamily, EquationSpec, Expression, Parameter};
pub use error::ChemEngError;
pub use fluids::{Bernoulli, Fluids};
pub use solver::{Solution, Solver, SolverOptions, UNKNOWN};
pub use stoichiometry::{Composition, Molecules, Stoichiometry};
pub use units::{parse_units, Dimension, Quantity, Unit, Units, STANDARD_GRAVITY};

/// Result type for chemeng operations
pub type ChemEngResult<T> = Result<T, ChemEngError>;

#[cfg(test)]
mod tests;
