//! Dense complex linear solve.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use wf_core::{Complex, is_finite_complex};

/// Solve `A x = b` by LU decomposition with partial pivoting.
pub fn solve_complex(
    matrix: DMatrix<Complex>,
    rhs: &DVector<Complex>,
) -> SolverResult<DVector<Complex>> {
    if !matrix.is_square() || matrix.nrows() != rhs.len() {
        return Err(SolverError::InvalidInput {
            what: format!(
                "system shape {}x{} does not match rhs length {}",
                matrix.nrows(),
                matrix.ncols(),
                rhs.len()
            ),
        });
    }

    let solution = matrix.lu().solve(rhs).ok_or_else(|| SolverError::Numeric {
        what: "singular complex system".to_string(),
    })?;

    if solution.iter().all(|v| is_finite_complex(*v)) {
        Ok(solution)
    } else {
        Err(SolverError::Numeric {
            what: "non-finite solution of complex system".to_string(),
        })
    }
}
