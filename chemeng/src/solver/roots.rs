//! Bracketing and refinement of real roots of a scalar function

use crate::{ChemEngError, ChemEngResult};
use std::cmp::Ordering;

/// A closed interval known to straddle a sign change (or touch a zero)
pub type Bracket = (f64, f64);

/// `{-10^(k-1), ..., -1, 0, 1, ..., 10^(k-1)}` in ascending order
pub fn search_grid(search_exponent: u32) -> Vec<f64> {
    let positive: Vec<f64> = (0..search_exponent as i32)
        .map(|k| 10f64.powi(k))
        .collect();
    positive
        .iter()
        .rev()
        .map(|x| -x)
        .chain(std::iter::once(0.0))
        .chain(positive.iter().copied())
        .collect()
}

/// Adjacent grid points whose sign classes differ
///
/// Points where `f` is NaN are skipped; the remaining points are compared in order.
pub fn find_brackets<F: Fn(f64) -> f64>(f: F, search_exponent: u32) -> Vec<Bracket> {
    let samples: Vec<(f64, Ordering)> = search_grid(search_exponent)
        .into_iter()
        .filter_map(|x| f(x).partial_cmp(&0.0).map(|sign| (x, sign)))
        .collect();

    samples
        .windows(2)
        .filter(|pair| pair[0].1 != pair[1].1)
        .map(|pair| (pair[0].0, pair[1].0))
        .collect()
}

/// Brent's method on `[lo, hi]`
///
/// Converges when the bracket half-width falls below `(xtol + rtol * |x|) / 2`.
pub fn brentq<F: Fn(f64) -> f64>(
    f: F,
    lo: f64,
    hi: f64,
    xtol: f64,
    rtol: f64,
    max_iterations: usize,
) -> ChemEngResult<f64> {
    let mut xpre = lo;
    let mut xcur = hi;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);
    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0_f64, 0.0_f64);

    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }
    if fpre.is_nan() || fcur.is_nan() || fpre.signum() == fcur.signum() {
        return Err(ChemEngError::Engine(format!(
            "Interval [{}, {}] does not bracket a root: f = ({}, {})",
            lo, hi, fpre, fcur
        )));
    }

    for _ in 0..max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (xtol + rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);
    }

    Err(ChemEngError::Engine(format!(
        "Root finding on [{}, {}] did not converge in {} iterations",
        lo, hi, max_iterations
    )))
}
