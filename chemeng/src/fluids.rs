//! Fluid dynamics equations

use crate::equation::{EquationFamily, EquationSpec, Parameter};
use crate::solver::{Solution, Solver, SolverOptions};
use crate::units::{Quantity, STANDARD_GRAVITY};
use crate::ChemEngResult;
use std::collections::BTreeMap;

/// Bernoulli's equation for an incompressible fluid along a streamline
///
/// Terms: `h` height (m), `G` gravitational acceleration (m/s**2),
/// `P` pressure (Pa), `rho` density (kg/m**3), `v` velocity (m/s).
#[derive(Debug, Clone, Copy, Default)]
pub struct Bernoulli;

impl EquationFamily for Bernoulli {
    fn name(&self) -> &str {
        "bernoulli"
    }

    fn template(&self) -> &str {
        "0.5 * {rho} * {v} ** 2 + {rho} * G * {h} + {P}"
    }

    fn term_units(&self) -> &[(&str, &str)] {
        &[
            ("h", "m"),
            ("G", "m/s**2"),
            ("P", "Pa"),
            ("rho", "kg/m**3"),
            ("v", "m/s"),
        ]
    }

    fn constants(&self) -> &[(&str, f64)] {
        &[("G", STANDARD_GRAVITY)]
    }
}

/// Solves fluid equations between an initial and a final state
///
/// Conservation gives `initial - final = 0`; a squared term such as `v` can
/// yield both a negative and a positive root.
#[derive(Debug, Clone)]
pub struct Fluids {
    solver: Solver,
    initial: BTreeMap<String, Parameter>,
    final_state: BTreeMap<String, Parameter>,
}

impl Fluids {
    /// Bind both states, converting every `"<value> <units>"` to SI
    pub fn new<I, J, K, V>(
        initial: I,
        final_state: J,
        options: SolverOptions,
    ) -> ChemEngResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        J: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut solver = Solver::new(options);
        let initial = solver.bind_parameters(initial)?;
        let final_state = solver.bind_parameters(final_state)?;
        Ok(Self {
            solver,
            initial,
            final_state,
        })
    }

    /// Solve Bernoulli's equation, returning `"<unknown> = <root> or <root>"`
    pub fn bernoulli(&mut self) -> ChemEngResult<String> {
        Ok(self.solve_family(&Bernoulli)?.to_string())
    }

    pub fn solve_family(&mut self, family: &dyn EquationFamily) -> ChemEngResult<Solution> {
        let spec = EquationSpec::compile(family)?;
        self.solver.solve(&spec, &self.initial, &self.final_state)
    }

    pub fn solutions(&self) -> &[Quantity] {
        self.solver.solutions()
    }

    pub fn unknown(&self) -> Option<&str> {
        self.solver.unknown()
    }

    pub fn sigfigs(&self) -> u32 {
        self.solver.units().sigfigs()
    }
}
