//! Direct solvers for dense and tridiagonal linear systems.

mod dense;
mod tridiagonal;

pub use dense::LuFactors;
pub use tridiagonal::solve_tridiagonal;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A zero diagonal element of `U` was hit during back substitution.
    #[error("singular matrix: zero diagonal in U at row {row}")]
    SingularMatrix { row: usize },

    /// A zero pivot was hit during tridiagonal elimination.
    #[error("tridiagonal system has no solution: zero pivot at row {row}")]
    ZeroPivot { row: usize },
}
