use thiserror::Error;

const VALUE_UNITS_PATTERN: &str = "'<number> <units>' where the number may carry a sign, a decimal \
point and an exponent (e.g. '-1.5e3'), and units are unit symbols joined by '*' or '/' with \
'**' or '^' used to indicate exponentiation (no parentheses)";

/// Error types for unit parsing, equation solving and stoichiometric balancing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemEngError {
    /// A value/unit string or chemical formula doesn't match the expected grammar
    #[error("Input string '{input}' doesn't match expected parsing pattern. Please enter it again using the pattern: {expected}")]
    MalformedInput { input: String, expected: String },

    /// A unit symbol that isn't in the unit table
    #[error("Unknown unit: '{unit}'. {suggestion}")]
    UnknownUnit { unit: String, suggestion: String },

    /// A unit expression using syntax the tokenizer can't fold into a unit (e.g. parentheses)
    #[error("Cannot determine how to build '{unit}' into final units from first occurrence in remaining unit string: '{remaining}'")]
    CannotBuildUnits { unit: String, remaining: String },

    /// Conversion between units of different dimensions
    #[error("Cannot convert from '{from}' to '{to}': dimensions do not match")]
    IncompatibleUnits { from: String, to: String },

    /// A reaction without a '>' separating reactants from products
    #[error("The input:\n\n{equation}\n\ndoes not contain a '>' character")]
    MissingDirectionMarker { equation: String },

    /// An element that only appears on one side of the reaction
    #[error("Element '{element}' {counts:?} is not present on both sides of chemical equation!")]
    UnbalanceableElement { element: String, counts: Vec<f64> },

    /// The bounded least-squares solve could not conserve every element
    #[error("Could not find balanced equation for '{equation}': residual cost {cost:e} exceeds tolerance {tolerance:e}")]
    NoBalancedSolution {
        equation: String,
        cost: f64,
        tolerance: f64,
    },

    /// An equation family that fails to supply its nomenclature or unit table
    #[error("Equation '{equation}' is not a valid registry entry: {message}")]
    ContractViolation { equation: String, message: String },

    /// A template placeholder with no supplied parameter
    #[error("Parameter '{parameter}' is required by the equation but was not supplied")]
    MissingParameter { parameter: String },

    /// Zero or several parameters marked as the unknown
    #[error("Exactly one parameter must be 'unknown', found {}", describe_unknowns(.found))]
    AmbiguousUnknown { found: Vec<String> },

    /// Input exceeds a configured limit
    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Numerical failure without a more specific cause
    #[error("Engine error: {0}")]
    Engine(String),
}

impl ChemEngError {
    /// Malformed value/unit string, using the standard value/unit pattern description
    pub fn malformed_quantity(input: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.into(),
            expected: VALUE_UNITS_PATTERN.to_string(),
        }
    }

    /// Malformed input with a custom description of what was expected
    pub fn malformed(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MalformedInput {
            input: input.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn limit_exceeded(
        limit_name: &str,
        limit_value: impl ToString,
        actual_value: impl ToString,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::ResourceLimitExceeded {
            limit_name: limit_name.to_string(),
            limit_value: limit_value.to_string(),
            actual_value: actual_value.to_string(),
            suggestion: suggestion.into(),
        }
    }
}

fn describe_unknowns(found: &[String]) -> String {
    if found.is_empty() {
        "none".to_string()
    } else {
        found
            .iter()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
