//! Equation registry
//!
//! An equation family supplies a template string, a table mapping each term to
//! its unit and any named constants. [`EquationSpec::compile`] parses the
//! template once and checks that every placeholder has a unit and every bare
//! name a constant, so a malformed family is rejected before any solve runs.

pub mod expression;
pub mod parser;

pub use expression::{ArithmeticOperation, Expression, ExpressionKind, Span};
pub use parser::parse_template;

use crate::units::{parse_units, Unit};
use crate::{ChemEngError, ChemEngResult};
use std::collections::BTreeMap;

/// A bound equation parameter: an SI magnitude or the single unknown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Known(f64),
    Unknown,
}

/// A family of physical equations that can be compiled and solved
pub trait EquationFamily {
    fn name(&self) -> &str;

    /// Arithmetic template with `{term}` placeholders
    fn template(&self) -> &str;

    /// (term, unit expression) pairs; every placeholder must appear here
    fn term_units(&self) -> &[(&str, &str)];

    /// Named constants in SI units
    fn constants(&self) -> &[(&str, f64)] {
        &[]
    }
}

/// A validated equation ready to evaluate
#[derive(Debug, Clone)]
pub struct EquationSpec {
    pub name: String,
    pub template: String,
    pub expression: Expression,
    pub term_units: BTreeMap<String, Unit>,
    pub constants: BTreeMap<String, f64>,
}

impl EquationSpec {
    pub fn compile(family: &dyn EquationFamily) -> ChemEngResult<Self> {
        let name = family.name().to_string();
        let violation = |message: String| ChemEngError::ContractViolation {
            equation: name.clone(),
            message,
        };

        if family.term_units().is_empty() {
            return Err(violation(
                "equation family must define a unit for each term".to_string(),
            ));
        }

        let mut term_units = BTreeMap::new();
        for (term, units) in family.term_units() {
            let unit = parse_units(units).map_err(|e| {
                violation(format!("unit '{}' for term '{}' is invalid: {}", units, term, e))
            })?;
            term_units.insert(term.to_string(), unit);
        }

        let constants: BTreeMap<String, f64> = family
            .constants()
            .iter()
            .map(|(constant, value)| (constant.to_string(), *value))
            .collect();

        let expression = parse_template(family.template())
            .map_err(|e| violation(format!("template does not parse: {}", e)))?;

        for (parameter, span) in expression.parameter_spans() {
            if !term_units.contains_key(&parameter) {
                return Err(violation(format!(
                    "template term '{{{}}}' at {} has no unit",
                    parameter, span
                )));
            }
        }
        for (constant, span) in expression.constant_spans() {
            if !constants.contains_key(&constant) {
                return Err(violation(format!(
                    "template name '{}' at {} is not a defined constant",
                    constant, span
                )));
            }
        }

        Ok(Self {
            name,
            template: family.template().to_string(),
            expression,
            term_units,
            constants,
        })
    }

    pub fn unit_of(&self, term: &str) -> Option<&Unit> {
        self.term_units.get(term)
    }

    /// Placeholder names used by the template
    pub fn parameters(&self) -> Vec<String> {
        self.expression.parameters()
    }

    pub fn evaluate(
        &self,
        parameters: &BTreeMap<String, Parameter>,
        unknown_value: f64,
    ) -> ChemEngResult<f64> {
        self.expression
            .evaluate(parameters, &self.constants, unknown_value)
    }
}
