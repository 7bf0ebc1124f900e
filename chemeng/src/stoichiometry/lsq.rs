//! Non-negative least squares (Lawson-Hanson active set)

use crate::{ChemEngError, ChemEngResult};
use nalgebra::{DMatrix, DVector};

const ITERATIONS_PER_COLUMN: usize = 30;
const SVD_EPSILON: f64 = 1e-10;

/// Iteration cap used by [`nnls`] for a matrix with `columns` columns
pub(crate) fn default_iterations(columns: usize) -> usize {
    ITERATIONS_PER_COLUMN * columns.max(1)
}

/// Solve `min ||A y - b||` subject to `y >= 0`
///
/// Columns enter the passive set in order of the largest positive gradient;
/// each passive subproblem is an unconstrained least-squares solve by SVD,
/// which gives the minimum-norm solution when the passive columns are
/// rank-deficient.
pub(crate) fn nnls(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    max_iterations: usize,
) -> ChemEngResult<DVector<f64>> {
    let (rows, columns) = a.shape();
    let tolerance = 10.0 * f64::EPSILON * rows.max(columns) as f64 * a.norm();

    let mut x = DVector::zeros(columns);
    let mut passive = vec![false; columns];
    // Columns that made no progress when added, until x next changes
    let mut excluded = vec![false; columns];
    let mut iterations = 0;

    loop {
        let gradient = a.transpose() * (b - a * &x);
        let entering = (0..columns)
            .filter(|&j| !passive[j] && !excluded[j] && gradient[j] > tolerance)
            .max_by(|&i, &j| gradient[i].total_cmp(&gradient[j]));
        let Some(entering) = entering else {
            break;
        };
        passive[entering] = true;

        let mut first_pass = true;
        loop {
            iterations += 1;
            if iterations > max_iterations {
                return Err(ChemEngError::Engine(format!(
                    "Non-negative least squares did not converge in {} iterations",
                    max_iterations
                )));
            }

            let indices: Vec<usize> = (0..columns).filter(|&j| passive[j]).collect();
            if indices.is_empty() {
                break;
            }
            let z = solve_passive(a, b, &indices)?;

            if indices.iter().all(|&j| z[j] > tolerance) {
                x = z;
                excluded.fill(false);
                break;
            }

            if first_pass && z[entering] <= tolerance {
                passive[entering] = false;
                excluded[entering] = true;
                break;
            }
            first_pass = false;

            let alpha = indices
                .iter()
                .filter(|&&j| z[j] <= tolerance && x[j] - z[j] > 0.0)
                .map(|&j| x[j] / (x[j] - z[j]))
                .fold(1.0_f64, f64::min);

            x += (&z - &x) * alpha;
            for &j in &indices {
                if x[j] <= tolerance {
                    x[j] = 0.0;
                    passive[j] = false;
                }
            }
            excluded.fill(false);
        }
    }

    Ok(x)
}

/// Unconstrained least squares over the passive columns, scattered back to full width
fn solve_passive(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    indices: &[usize],
) -> ChemEngResult<DVector<f64>> {
    let subset = a.select_columns(indices.iter());
    let solution = subset
        .svd(true, true)
        .solve(b, SVD_EPSILON)
        .map_err(|e| ChemEngError::Engine(format!("Least-squares solve failed: {}", e)))?;

    let mut full = DVector::zeros(a.ncols());
    for (value, &j) in solution.iter().zip(indices) {
        full[j] = *value;
    }
    Ok(full)
}
