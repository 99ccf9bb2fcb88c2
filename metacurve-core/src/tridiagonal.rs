//! Tridiagonal and cyclic-tridiagonal linear solvers.
//!
//! For a system of size `n`, `lower[i]` is the coefficient of `x[i]` in row
//! `i + 1`, `upper[i]` the coefficient of `x[i + 1]` in row `i`; both have
//! `n - 1` entries. The cyclic variant adds the two wrap-around corners:
//! `corner_low_left` (row `n - 1`, column 0) and `corner_up_right` (row 0,
//! column `n - 1`).

use crate::error::{CurveError, Result};
use crate::types::Scalar;

/// Solve a tridiagonal system with the Thomas algorithm.
pub fn solve_tridiagonal(
    lower: &[Scalar],
    diag: &[Scalar],
    upper: &[Scalar],
    rhs: &[Scalar],
) -> Result<Vec<Scalar>> {
    let n = diag.len();
    check_dimensions(n, lower, upper, rhs)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let pivot = diag[0];
    if is_singular_pivot(pivot, diag[0].abs()) {
        return Err(CurveError::SingularSystem { size: n });
    }
    if n > 1 {
        c[0] = upper[0] / pivot;
    }
    d[0] = rhs[0] / pivot;

    for i in 1..n {
        let eliminated = lower[i - 1] * c[i - 1];
        let pivot = diag[i] - eliminated;
        if is_singular_pivot(pivot, diag[i].abs() + eliminated.abs()) {
            return Err(CurveError::SingularSystem { size: n });
        }
        if i < n - 1 {
            c[i] = upper[i] / pivot;
        }
        d[i] = lower[i - 1].mul_add(-d[i - 1], rhs[i]) / pivot;
    }

    for i in (0..n - 1).rev() {
        d[i] = c[i].mul_add(-d[i + 1], d[i]);
    }
    Ok(d)
}

/// Solve a cyclic tridiagonal system.
///
/// Sizes 1 and 2 fold the corners into the dense matrix; larger systems use
/// the Sherman-Morrison correction on top of [`solve_tridiagonal`].
#[expect(
    clippy::many_single_char_names,
    reason = "standard Sherman-Morrison variable names"
)]
pub fn solve_cyclic_tridiagonal(
    lower: &[Scalar],
    diag: &[Scalar],
    upper: &[Scalar],
    rhs: &[Scalar],
    corner_low_left: Scalar,
    corner_up_right: Scalar,
) -> Result<Vec<Scalar>> {
    let n = diag.len();
    check_dimensions(n, lower, upper, rhs)?;

    match n {
        0 => return Ok(Vec::new()),
        1 => {
            let a = diag[0] + corner_low_left + corner_up_right;
            if is_singular_pivot(a, diag[0].abs()) {
                return Err(CurveError::SingularSystem { size: 1 });
            }
            return Ok(vec![rhs[0] / a]);
        }
        2 => {
            let (a, b) = (diag[0], upper[0] + corner_up_right);
            let (c, d) = (lower[0] + corner_low_left, diag[1]);
            let det = a.mul_add(d, -(b * c));
            if is_singular_pivot(det, (a * d).abs() + (b * c).abs()) {
                return Err(CurveError::SingularSystem { size: 2 });
            }
            return Ok(vec![
                d.mul_add(rhs[0], -(b * rhs[1])) / det,
                a.mul_add(rhs[1], -(c * rhs[0])) / det,
            ]);
        }
        _ => {}
    }

    // Any non-zero gamma works; -diag[0] keeps the modified pivot well away
    // from zero.
    let gamma = if diag[0] == 0.0 { -1.0 } else { -diag[0] };
    let alpha = corner_low_left;
    let beta = corner_up_right;

    let mut modified = diag.to_vec();
    modified[0] -= gamma;
    modified[n - 1] -= alpha * beta / gamma;

    let x = solve_tridiagonal(lower, &modified, upper, rhs)?;

    let mut u = vec![0.0; n];
    u[0] = gamma;
    u[n - 1] = alpha;
    let z = solve_tridiagonal(lower, &modified, upper, &u)?;

    let tail = beta * z[n - 1] / gamma;
    let denom = 1.0 + z[0] + tail;
    if is_singular_pivot(denom, 1.0 + z[0].abs() + tail.abs()) {
        return Err(CurveError::SingularSystem { size: n });
    }
    let fact = (x[0] + beta * x[n - 1] / gamma) / denom;

    Ok(x.iter().zip(&z).map(|(xi, zi)| fact.mul_add(-zi, *xi)).collect())
}

fn check_dimensions(n: usize, lower: &[Scalar], upper: &[Scalar], rhs: &[Scalar]) -> Result<()> {
    let off = n.saturating_sub(1);
    if lower.len() != off || upper.len() != off || rhs.len() != n {
        return Err(CurveError::DimensionMismatch);
    }
    Ok(())
}

/// Relative size below which a pivot counts as cancelled; a few dozen ulps
/// absorbs the rounding of the elimination steps.
const PIVOT_TOLERANCE: Scalar = 64.0 * Scalar::EPSILON;

/// A pivot is singular when it is not finite or vanishes relative to the
/// magnitude of the terms it was computed from.
fn is_singular_pivot(pivot: Scalar, scale: Scalar) -> bool {
    !pivot.is_finite() || pivot.abs() <= PIVOT_TOLERANCE * scale.max(Scalar::MIN_POSITIVE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
