//! Iterative solvers for scalar and vector nonlinear equations.

mod scalar;
mod system;

pub use scalar::{fixed_point, newton, newton_with_derivative};
pub use system::{fixed_point_system, newton_system};

use thiserror::Error;

/// Outcome of an iterative solve: the final iterate and the number of steps
/// actually taken.
///
/// Hitting the iteration cap is not a failure; `iterations == cap` tells the
/// caller the tolerance was not reached and the iterate is a degraded answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResult<X> {
    pub x: X,
    pub iterations: usize,
}

#[derive(Debug, Error)]
pub enum Error {
    /// The linear system of a Newton step could not be solved.
    #[error(transparent)]
    Linear(#[from] linear::Error),
}
