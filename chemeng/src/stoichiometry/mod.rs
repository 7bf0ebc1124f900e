//! Chemical equation balancing
//!
//! `CH4 + O2 --> CO2 + H2O` is split into reactant and product molecules, each
//! molecule is reduced to element counts, and the counts form an element
//! balance matrix `A` (reactants positive, products negated). The balanced
//! coefficients are the `x >= 1` minimizing `||A x||`, solved as a
//! non-negative least-squares problem in `y = x - 1`.

pub mod formula;
pub(crate) mod lsq;

pub use formula::{expand_groups, strip_coefficient, Composition};

use crate::config::SolverConfig;
use crate::units::round_to_decimals;
use crate::{ChemEngError, ChemEngResult};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use tracing::debug;

const DIRECTION_MARKER: char = '>';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Molecules {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl Molecules {
    pub fn len(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reactants then products
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(String::as_str)
    }
}

/// A balanced chemical equation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stoichiometry {
    pub input_eq: String,
    pub molecules: Molecules,
    /// One row per element, in order of first appearance
    pub element_balance: Vec<(String, Vec<f64>)>,
    /// One coefficient per molecule, reactants first
    pub balance: Vec<f64>,
    /// Residual `½||A x||²` of the unrounded solution
    pub cost: f64,
    pub result: String,
}

impl Stoichiometry {
    pub fn new(input_eq: &str) -> ChemEngResult<Self> {
        Self::with_config(input_eq, &SolverConfig::default())
    }

    pub fn with_config(input_eq: &str, config: &SolverConfig) -> ChemEngResult<Self> {
        config.check_input_size(input_eq)?;
        if !input_eq.contains(DIRECTION_MARKER) {
            return Err(ChemEngError::MissingDirectionMarker {
                equation: input_eq.to_string(),
            });
        }

        let expanded = expand_groups(input_eq, config)?;
        let molecules = split_molecules(&expanded)?;

        let compositions = molecules
            .iter()
            .map(Composition::parse)
            .collect::<ChemEngResult<Vec<_>>>()?;
        let element_balance = element_rows(&compositions, molecules.reactants.len());
        validate_element_balance(&element_balance)?;

        let a = DMatrix::from_fn(element_balance.len(), molecules.len(), |i, j| {
            element_balance[i].1[j]
        });
        let (coefficients, cost) = balance_equation(&a)?;
        debug!(equation = %input_eq, cost, ?coefficients, "balanced equation");

        if cost > config.balance_tolerance {
            return Err(ChemEngError::NoBalancedSolution {
                equation: input_eq.to_string(),
                cost,
                tolerance: config.balance_tolerance,
            });
        }

        let balance = normalize(coefficients, config.round_to_decimals);
        let result = format_result(&molecules, &balance);

        Ok(Self {
            input_eq: input_eq.to_string(),
            molecules,
            element_balance,
            balance,
            cost,
            result,
        })
    }

    /// Element balance matrix: rows are elements, columns are molecules
    pub fn matrix(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.element_balance.len(), self.molecules.len(), |i, j| {
            self.element_balance[i].1[j]
        })
    }

    pub fn element_row(&self, element: &str) -> Option<&[f64]> {
        self.element_balance
            .iter()
            .find(|(symbol, _)| symbol == element)
            .map(|(_, row)| row.as_slice())
    }
}

fn split_molecules(expanded: &str) -> ChemEngResult<Molecules> {
    let mut sides = expanded.split(DIRECTION_MARKER);
    let (Some(reactants), Some(products), None) = (sides.next(), sides.next(), sides.next())
    else {
        return Err(ChemEngError::malformed(
            expanded,
            "exactly one '>' separating reactants from products",
        ));
    };

    let is_arrow = |c: char| c.is_whitespace() || matches!(c, '-' | '=' | '<');
    Ok(Molecules {
        reactants: split_side(reactants.trim_end_matches(is_arrow), expanded)?,
        products: split_side(products.trim_start_matches(is_arrow), expanded)?,
    })
}

fn split_side(side: &str, equation: &str) -> ChemEngResult<Vec<String>> {
    side.split('+')
        .map(|molecule| {
            let molecule = strip_coefficient(molecule);
            if molecule.is_empty() {
                Err(ChemEngError::malformed(
                    equation,
                    "molecules separated by '+' on each side of the reaction",
                ))
            } else {
                Ok(molecule.to_string())
            }
        })
        .collect()
}

fn element_rows(compositions: &[Composition], reactant_count: usize) -> Vec<(String, Vec<f64>)> {
    let mut elements: Vec<&str> = Vec::new();
    for composition in compositions {
        for element in composition.elements() {
            if !elements.contains(&element) {
                elements.push(element);
            }
        }
    }

    elements
        .into_iter()
        .map(|element| {
            let row = compositions
                .iter()
                .enumerate()
                .map(|(j, composition)| {
                    let count = composition.get(element);
                    if j < reactant_count {
                        count
                    } else {
                        // no negative zeros for absent elements
                        0.0 - count
                    }
                })
                .collect();
            (element.to_string(), row)
        })
        .collect()
}

fn validate_element_balance(element_balance: &[(String, Vec<f64>)]) -> ChemEngResult<()> {
    for (element, row) in element_balance {
        let in_reactants = row.iter().any(|&count| count > 0.0);
        let in_products = row.iter().any(|&count| count < 0.0);
        if !in_reactants || !in_products {
            return Err(ChemEngError::UnbalanceableElement {
                element: element.clone(),
                counts: row.clone(),
            });
        }
    }
    Ok(())
}

/// Coefficients `x >= 1` minimizing `||A x||`, with the cost `½||A x||²`
fn balance_equation(a: &DMatrix<f64>) -> ChemEngResult<(Vec<f64>, f64)> {
    let ones = DVector::repeat(a.ncols(), 1.0);
    let b = -(a * &ones);
    let y = lsq::nnls(a, &b, lsq::default_iterations(a.ncols()))?;
    let x = ones + y;
    let cost = 0.5 * (a * &x).norm_squared();
    Ok((x.iter().copied().collect(), cost))
}

fn normalize(mut coefficients: Vec<f64>, decimals: u32) -> Vec<f64> {
    let min = coefficients.iter().copied().fold(f64::INFINITY, f64::min);
    if min > 1.0 {
        for coefficient in &mut coefficients {
            *coefficient /= min;
        }
    }
    coefficients
        .into_iter()
        .map(|coefficient| round_to_decimals(coefficient, decimals))
        .collect()
}

fn format_result(molecules: &Molecules, balance: &[f64]) -> String {
    let (reactant_coefficients, product_coefficients) = balance.split_at(molecules.reactants.len());
    [
        format_side(&molecules.reactants, reactant_coefficients),
        format_side(&molecules.products, product_coefficients),
    ]
    .join(" --> ")
}

fn format_side(molecules: &[String], coefficients: &[f64]) -> String {
    molecules
        .iter()
        .zip(coefficients)
        .map(|(molecule, &coefficient)| {
            if coefficient == 1.0 {
                molecule.clone()
            } else {
                format!("{:?} {}", coefficient, molecule)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}
