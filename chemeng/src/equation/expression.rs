use super::Parameter;
use crate::{ChemEngError, ChemEngResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Byte range of an expression within its template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        Self {
            start: span.start(),
            end: span.end(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A node of a parsed equation template
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Number(f64),
    /// A `{name}` placeholder bound to a supplied parameter
    Parameter(String),
    /// A bare name bound to one of the equation's constants
    Constant(String),
    Negate(Box<Expression>),
    Arithmetic(Box<Expression>, ArithmeticOperation, Box<Expression>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl ArithmeticOperation {
    fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOperation::Add => "+",
            ArithmeticOperation::Subtract => "-",
            ArithmeticOperation::Multiply => "*",
            ArithmeticOperation::Divide => "/",
            ArithmeticOperation::Power => "**",
        }
    }

    fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            ArithmeticOperation::Add => left + right,
            ArithmeticOperation::Subtract => left - right,
            ArithmeticOperation::Multiply => left * right,
            ArithmeticOperation::Divide => left / right,
            ArithmeticOperation::Power => left.powf(right),
        }
    }
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Placeholder names in order of first appearance
    pub fn parameters(&self) -> Vec<String> {
        self.parameter_spans().into_iter().map(|(name, _)| name).collect()
    }

    /// Constant names in order of first appearance
    pub fn constants(&self) -> Vec<String> {
        self.constant_spans().into_iter().map(|(name, _)| name).collect()
    }

    /// Placeholders with the span of their first appearance
    pub fn parameter_spans(&self) -> Vec<(String, Span)> {
        self.first_occurrences(|kind| match kind {
            ExpressionKind::Parameter(name) => Some(name),
            _ => None,
        })
    }

    /// Constants with the span of their first appearance
    pub fn constant_spans(&self) -> Vec<(String, Span)> {
        self.first_occurrences(|kind| match kind {
            ExpressionKind::Constant(name) => Some(name),
            _ => None,
        })
    }

    fn first_occurrences(
        &self,
        select: impl Fn(&ExpressionKind) -> Option<&String>,
    ) -> Vec<(String, Span)> {
        let mut seen = BTreeSet::new();
        let mut found = Vec::new();
        self.visit(&mut |expr| {
            if let Some(name) = select(&expr.kind) {
                if seen.insert(name.clone()) {
                    found.push((name.clone(), expr.span));
                }
            }
        });
        found
    }

    fn visit(&self, f: &mut impl FnMut(&Expression)) {
        f(self);
        match &self.kind {
            ExpressionKind::Negate(inner) => inner.visit(f),
            ExpressionKind::Arithmetic(left, _, right) => {
                left.visit(f);
                right.visit(f);
            }
            ExpressionKind::Number(_)
            | ExpressionKind::Parameter(_)
            | ExpressionKind::Constant(_) => {}
        }
    }

    /// Evaluate with `unknown_value` substituted for the unknown parameter
    pub fn evaluate(
        &self,
        parameters: &BTreeMap<String, Parameter>,
        constants: &BTreeMap<String, f64>,
        unknown_value: f64,
    ) -> ChemEngResult<f64> {
        match &self.kind {
            ExpressionKind::Number(value) => Ok(*value),
            ExpressionKind::Parameter(name) => match parameters.get(name) {
                Some(Parameter::Known(value)) => Ok(*value),
                Some(Parameter::Unknown) => Ok(unknown_value),
                None => Err(ChemEngError::MissingParameter {
                    parameter: name.clone(),
                }),
            },
            ExpressionKind::Constant(name) => constants
                .get(name)
                .copied()
                .ok_or_else(|| ChemEngError::Engine(format!("Undefined constant '{}'", name))),
            ExpressionKind::Negate(inner) => {
                Ok(-inner.evaluate(parameters, constants, unknown_value)?)
            }
            ExpressionKind::Arithmetic(left, operation, right) => {
                let left = left.evaluate(parameters, constants, unknown_value)?;
                let right = right.evaluate(parameters, constants, unknown_value)?;
                Ok(operation.apply(left, right))
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Number(value) => write!(f, "{}", value),
            ExpressionKind::Parameter(name) => write!(f, "{{{}}}", name),
            ExpressionKind::Constant(name) => write!(f, "{}", name),
            ExpressionKind::Negate(inner) => write!(f, "-({})", inner),
            ExpressionKind::Arithmetic(left, operation, right) => {
                write!(f, "({} {} {})", left, operation.symbol(), right)
            }
        }
    }
}
