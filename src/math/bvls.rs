//! Bounded-variable least squares.
//!
//! Solves:
//!
//! ```text
//! minimize ‖A x − b‖₂²   subject to   lo ≤ x ≤ hi  componentwise
//! ```
//!
//! using a deterministic active-set method (Stark–Parker style): variables
//! start pinned at their lower bounds; each outer iteration frees the bound
//! variable whose KKT multiplier most strongly favors moving into the
//! interior, then re-solves the unconstrained subproblem on the free set,
//! clipping the step at the first blocking bound.
//!
//! Implementation choices:
//! - The free subproblem is solved via SVD, so rank-deficient systems
//!   (fewer columns than rows, collinear columns) yield the minimum-norm
//!   least-squares solution instead of failing.
//! - The iterate is always feasible; if the iteration cap is reached before
//!   the KKT conditions hold, the best feasible iterate found so far is
//!   returned. Non-convergence is a quality degradation, never an error.
//! - No randomization anywhere: fixed inputs give a fixed output.

use nalgebra::{DMatrix, DVector};

/// Outer-iteration cap. Each outer iteration frees at most one variable, so
/// anything beyond a few times the column count is cycling, not progress.
pub const DEFAULT_MAX_ITER: usize = 100;

/// First-order optimality tolerance on the projected gradient.
const KKT_TOL: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VarState {
    Free,
    AtLower,
    AtUpper,
}

/// Solution of a bounded least-squares problem.
#[derive(Debug, Clone)]
pub struct BvlsSolution {
    /// Feasible minimizer (or best feasible iterate at the iteration cap).
    pub x: DVector<f64>,
    /// Outer iterations consumed.
    pub iterations: usize,
    /// Whether the projected gradient vanished within tolerance.
    pub converged: bool,
}

/// Solve `min ‖A x − b‖²` subject to `lower ≤ x ≤ upper`.
///
/// Weighting is the caller's concern: scale the rows of `A` and `b` by
/// `√w` beforehand (see `opt::solver`).
pub fn solve_bvls(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    lower: &DVector<f64>,
    upper: &DVector<f64>,
    max_iter: usize,
) -> BvlsSolution {
    let n = a.ncols();
    debug_assert_eq!(a.nrows(), b.len());
    debug_assert_eq!(lower.len(), n);
    debug_assert_eq!(upper.len(), n);

    // Start feasible with every variable pinned low.
    let mut x = lower.clone();
    let mut state = vec![VarState::AtLower; n];

    let mut best_x = x.clone();
    let mut best_sse = residual_sse(a, b, &x);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iter {
        iterations += 1;

        // Gradient of ½‖Ax − b‖² is Aᵀ(Ax − b). A bound variable wants to
        // enter the interior when moving off its bound decreases the
        // objective: at a lower bound that means g < 0, at an upper bound
        // g > 0. Pick the strongest violation; ties go to the lowest index.
        let g = a.transpose() * (a * &x - b);
        let mut pick: Option<(usize, f64)> = None;
        for j in 0..n {
            let violation = match state[j] {
                VarState::AtLower => -g[j],
                VarState::AtUpper => g[j],
                VarState::Free => continue,
            };
            if violation > KKT_TOL && pick.is_none_or(|(_, best)| violation > best) {
                pick = Some((j, violation));
            }
        }
        let Some((freed, _)) = pick else {
            converged = true;
            break;
        };
        state[freed] = VarState::Free;

        // Inner loop: solve the free subproblem; every pass either accepts
        // the subproblem optimum or re-pins a blocking variable, so the
        // free set strictly shrinks and the loop terminates.
        loop {
            let free: Vec<usize> = (0..n).filter(|&j| state[j] == VarState::Free).collect();
            if free.is_empty() {
                break;
            }

            // Fold the pinned variables' contribution into the target.
            let mut rhs = b.clone();
            for j in 0..n {
                if state[j] != VarState::Free {
                    rhs -= a.column(j) * x[j];
                }
            }
            let sub = a.select_columns(free.iter());
            let Some(z) = solve_least_squares(&sub, &rhs) else {
                // Too ill-conditioned to improve; keep the current feasible x.
                break;
            };

            // Largest feasible step from x toward z along the free set.
            let mut alpha = 1.0_f64;
            let mut blocking: Option<(usize, VarState)> = None;
            for (k, &j) in free.iter().enumerate() {
                let (bound, pin) = if z[k] < lower[j] {
                    (lower[j], VarState::AtLower)
                } else if z[k] > upper[j] {
                    (upper[j], VarState::AtUpper)
                } else {
                    continue;
                };
                let denom = z[k] - x[j];
                let step = if denom.abs() > f64::EPSILON {
                    ((bound - x[j]) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if step < alpha || blocking.is_none() {
                    alpha = step.min(alpha);
                    blocking = Some((j, pin));
                }
            }

            match blocking {
                None => {
                    // Subproblem optimum is interior to the box: accept it.
                    for (k, &j) in free.iter().enumerate() {
                        x[j] = z[k];
                    }
                    break;
                }
                Some((jb, pin)) => {
                    for (k, &j) in free.iter().enumerate() {
                        x[j] = (x[j] + alpha * (z[k] - x[j])).clamp(lower[j], upper[j]);
                    }
                    x[jb] = match pin {
                        VarState::AtLower => lower[jb],
                        VarState::AtUpper => upper[jb],
                        VarState::Free => unreachable!("blocking variable is always pinned"),
                    };
                    state[jb] = pin;
                }
            }
        }

        let sse = residual_sse(a, b, &x);
        if sse < best_sse {
            best_sse = sse;
            best_x = x.clone();
        }
    }

    if converged {
        best_x = x;
    }
    BvlsSolution {
        x: best_x,
        iterations,
        converged,
    }
}

/// Solve an unconstrained least-squares problem via SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

fn residual_sse(a: &DMatrix<f64>, b: &DVector<f64>, x: &DVector<f64>) -> f64 {
    (a * x - b).norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(n: usize, lo: f64, hi: f64) -> (DVector<f64>, DVector<f64>) {
        (DVector::from_element(n, lo), DVector::from_element(n, hi))
    }

    #[test]
    fn interior_optimum_matches_unconstrained_solution() {
        // Identity system: the unconstrained optimum is b itself, well
        // inside the box.
        let a = DMatrix::<f64>::identity(2, 2);
        let b = DVector::from_row_slice(&[50.0, 200.0]);
        let (lo, hi) = bounds(2, 10.0, 400.0);

        let sol = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        assert!(sol.converged);
        assert!((sol.x[0] - 50.0).abs() < 1e-9);
        assert!((sol.x[1] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn optimum_outside_box_clamps_to_active_bound() {
        let a = DMatrix::<f64>::identity(1, 1);
        let (lo, hi) = bounds(1, 10.0, 400.0);

        let high = solve_bvls(&a, &DVector::from_row_slice(&[500.0]), &lo, &hi, DEFAULT_MAX_ITER);
        assert!((high.x[0] - 400.0).abs() < 1e-9);

        let low = solve_bvls(&a, &DVector::from_row_slice(&[3.0]), &lo, &hi, DEFAULT_MAX_ITER);
        assert!((low.x[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tall_single_column_system_returns_bounded_minimizer() {
        // One variable against many rows: the least-squares answer is the
        // mean of b over the column of ones.
        let a = DMatrix::<f64>::from_element(4, 1, 1.0);
        let b = DVector::from_row_slice(&[90.0, 110.0, 100.0, 100.0]);
        let (lo, hi) = bounds(1, 10.0, 400.0);

        let sol = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        assert!((sol.x[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn mixed_active_and_free_variables() {
        // Diagonal system where one target sits far above the box: that
        // variable pins at its upper bound, the other stays interior.
        let a = DMatrix::<f64>::from_diagonal(&DVector::from_row_slice(&[1.0, 1.0]));
        let b = DVector::from_row_slice(&[1000.0, 120.0]);
        let (lo, hi) = bounds(2, 10.0, 400.0);

        let sol = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        assert!((sol.x[0] - 400.0).abs() < 1e-9);
        assert!((sol.x[1] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn rank_deficient_columns_still_feasible() {
        // Two identical columns: infinitely many unconstrained optima. The
        // solver must still return a feasible point with a small residual.
        let a = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_row_slice(&[100.0, 100.0]);
        let (lo, hi) = bounds(2, 10.0, 400.0);

        let sol = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        for j in 0..2 {
            assert!(sol.x[j] >= 10.0 - 1e-9 && sol.x[j] <= 400.0 + 1e-9);
        }
        let fitted = sol.x[0] + sol.x[1];
        assert!((fitted - 100.0).abs() < 1e-6);
    }

    #[test]
    fn deterministic_across_repeated_solves() {
        let a = DMatrix::<f64>::from_row_slice(
            3,
            2,
            &[1.0, 0.5, 0.2, 1.0, 0.7, 0.1],
        );
        let b = DVector::from_row_slice(&[120.0, 80.0, 60.0]);
        let (lo, hi) = bounds(2, 10.0, 400.0);

        let first = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        let second = solve_bvls(&a, &b, &lo, &hi, DEFAULT_MAX_ITER);
        assert_eq!(first.x, second.x);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn result_is_feasible_even_with_tiny_iteration_cap() {
        let a = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let b = DVector::from_row_slice(&[300.0, 300.0]);
        let (lo, hi) = bounds(2, 10.0, 400.0);

        let sol = solve_bvls(&a, &b, &lo, &hi, 1);
        for j in 0..2 {
            assert!(sol.x[j] >= 10.0 && sol.x[j] <= 400.0);
        }
    }

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }
}
