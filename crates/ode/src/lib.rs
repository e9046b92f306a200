//! Initial-value integrators and two-point boundary-value solvers for the
//! second-order linear equation `p(x)·y'' + q(x)·y' + r(x)·y + f(x) = 0`.

mod bvp;
mod equation;
mod estimate;
mod grid;
mod ivp;

pub use bvp::{BoundaryCondition, BvpMethod, FiniteDifference, Shooting};
pub use equation::{Coeff, DiffEquation};
pub use estimate::{max_absolute_error, richardson_extrapolate, runge_romberg_error};
pub use grid::Grid;
pub use ivp::{Adams, Euler, ImprovedEuler, OdeMethod, RungeKutta4};

use thiserror::Error;

/// A solution matrix: row 0 holds the grid nodes, the remaining rows the
/// state components at each node.
pub type Trajectory = nalgebra::DMatrix<f64>;

#[derive(Debug, Error)]
pub enum Error {
    /// The grid has fewer nodes than the method's stencil needs.
    #[error("grid of {len} nodes is too small, the method needs at least {min}")]
    GridTooSmall { len: usize, min: usize },

    /// Both leading coefficients of `a·y' + b·y + c = 0` are zero.
    #[error("degenerate boundary condition: a = b = 0")]
    InvalidBoundaryCondition,

    #[error(transparent)]
    Linear(#[from] linear::Error),
}
