/// Numerical settings and input limits shared by the solvers
///
/// The defaults reproduce the reference behavior; every field can be tightened
/// or relaxed per solver instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Ceiling for tracked significant figures
    /// Used as-is when no parsed input carries fewer
    pub max_sigfigs: u32,

    /// Root search grid spans ±10^0 ..= ±10^(search_exponent - 1) plus zero
    pub search_exponent: u32,

    /// Absolute tolerance for Brent's method
    pub root_xtol: f64,

    /// Relative tolerance for Brent's method
    pub root_rtol: f64,

    /// Iteration cap for Brent's method
    pub max_root_iterations: usize,

    /// Largest acceptable least-squares cost (½‖A·x‖²) for a balanced reaction
    pub balance_tolerance: f64,

    /// Decimal places kept in balanced coefficients
    pub round_to_decimals: u32,

    /// Maximum nesting of parenthesized groups in a formula
    /// Real usage: 2-3 levels, Limit: 32
    pub max_group_depth: usize,

    /// Maximum length of a formula after group expansion, in bytes
    pub max_expanded_bytes: usize,

    /// Maximum length of any single input string in bytes
    /// Real usage: ~50 bytes, Limit: 4KB
    pub max_input_bytes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_sigfigs: 6,
            search_exponent: 7,
            root_xtol: 2e-12,
            root_rtol: 4.0 * f64::EPSILON,
            max_root_iterations: 100,
            balance_tolerance: 1e-16,
            round_to_decimals: 2,
            max_group_depth: 32,
            max_expanded_bytes: 65_536,
            max_input_bytes: 4096,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults with a different significant-figure ceiling
    pub fn with_max_sigfigs(max_sigfigs: u32) -> Self {
        Self {
            max_sigfigs,
            ..Self::default()
        }
    }

    pub(crate) fn check_input_size(&self, input: &str) -> crate::ChemEngResult<()> {
        if input.len() > self.max_input_bytes {
            return Err(crate::ChemEngError::limit_exceeded(
                "max_input_bytes",
                format!("{} bytes", self.max_input_bytes),
                format!("{} bytes", input.len()),
                "Shorten the input or raise max_input_bytes",
            ));
        }
        Ok(())
    }
}
