//! Bounded weighted least-squares solve behind a strategy seam.
//!
//! The pipeline only depends on the [`BoundedLeastSquares`] trait, so the
//! exact algorithm is swappable and independently testable against known
//! closed-form solutions. The default strategy row-scales the system by
//! `√w` and runs the deterministic active-set method from `math::bvls`.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::domain::MassBounds;
use crate::math::{DEFAULT_MAX_ITER, solve_bvls};

/// Strategy seam for the bounded weighted least-squares solve.
///
/// Implementations must be deterministic and must always return a feasible
/// mass vector (`bounds.min_g ≤ x ≤ bounds.max_g` componentwise), even when
/// the system is rank deficient or the iteration budget runs out.
pub trait BoundedLeastSquares {
    /// Minimize `‖diag(√w)(A x − b)‖²` subject to the mass bounds.
    fn solve(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        weights: &DVector<f64>,
        bounds: &MassBounds,
    ) -> DVector<f64>;
}

/// Default strategy: active-set bounded-variable least squares.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSetSolver {
    pub max_iter: usize,
}

impl Default for ActiveSetSolver {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl BoundedLeastSquares for ActiveSetSolver {
    fn solve(
        &self,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        weights: &DVector<f64>,
        bounds: &MassBounds,
    ) -> DVector<f64> {
        // Fold the weights into the system: scaling row i by √w_i turns the
        // weighted objective into a plain least-squares residual.
        let sqrt_w = weights.map(|w| w.max(0.0).sqrt());
        let mut aw = a.clone();
        for i in 0..aw.nrows() {
            let s = sqrt_w[i];
            for j in 0..aw.ncols() {
                aw[(i, j)] *= s;
            }
        }
        let bw = b.component_mul(&sqrt_w);

        let n = a.ncols();
        let lower = DVector::from_element(n, bounds.min_g);
        let upper = DVector::from_element(n, bounds.max_g);

        let solution = solve_bvls(&aw, &bw, &lower, &upper, self.max_iter);
        debug!(
            iterations = solution.iterations,
            converged = solution.converged,
            variables = n,
            "bounded least-squares solve finished"
        );
        solution.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bounds() -> MassBounds {
        MassBounds {
            min_g: 0.0,
            max_g: 1e6,
        }
    }

    #[test]
    fn uniform_weights_reduce_to_plain_least_squares() {
        // Two observations of a single variable: the optimum is the mean.
        let a = DMatrix::<f64>::from_element(2, 1, 1.0);
        let b = DVector::from_row_slice(&[100.0, 300.0]);
        let w = DVector::from_element(2, 1.0);

        let x = ActiveSetSolver::default().solve(&a, &b, &w, &wide_bounds());
        assert!((x[0] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn weights_tilt_the_diagonal_solution() {
        // Closed form: min 3(x-100)^2 + (x-300)^2 has optimum x = 150.
        let a = DMatrix::<f64>::from_element(2, 1, 1.0);
        let b = DVector::from_row_slice(&[100.0, 300.0]);
        let w = DVector::from_row_slice(&[3.0, 1.0]);

        let x = ActiveSetSolver::default().solve(&a, &b, &w, &wide_bounds());
        assert!((x[0] - 150.0).abs() < 1e-9);
    }

    #[test]
    fn solution_respects_mass_bounds() {
        let a = DMatrix::<f64>::identity(2, 2);
        let b = DVector::from_row_slice(&[5000.0, 1.0]);
        let w = DVector::from_element(2, 1.0);
        let bounds = MassBounds::default();

        let x = ActiveSetSolver::default().solve(&a, &b, &w, &bounds);
        assert!((x[0] - bounds.max_g).abs() < 1e-9);
        assert!((x[1] - bounds.min_g).abs() < 1e-9);
    }

    #[test]
    fn zero_weight_axis_is_ignored() {
        // The second row disagrees wildly but carries no weight.
        let a = DMatrix::<f64>::from_row_slice(2, 1, &[1.0, 1.0]);
        let b = DVector::from_row_slice(&[100.0, 9000.0]);
        let w = DVector::from_row_slice(&[1.0, 0.0]);

        let x = ActiveSetSolver::default().solve(&a, &b, &w, &wide_bounds());
        assert!((x[0] - 100.0).abs() < 1e-9);
    }
}
