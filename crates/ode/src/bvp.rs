//! Two-point boundary-value solvers: shooting and finite differences.

use nalgebra::{DMatrix, DVector, MatrixXx3, Vector2};

use crate::{DiffEquation, Error, Grid, OdeMethod, RungeKutta4, Trajectory};

/// Endpoint condition `a·y' + b·y + c = 0`, classified by the vanishing
/// leading coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// `y = value` at the endpoint.
    Dirichlet(f64),
    /// `y' = value` at the endpoint.
    Neumann(f64),
    /// `a·y' + b·y + c = 0` with both `a` and `b` nonzero.
    Mixed { a: f64, b: f64, c: f64 },
}

impl BoundaryCondition {
    /// Classifies a raw coefficient triple. Both leading coefficients zero
    /// is a degenerate condition and is rejected.
    pub fn from_coefficients(a: f64, b: f64, c: f64) -> Result<Self, Error> {
        if a == 0.0 && b == 0.0 {
            Err(Error::InvalidBoundaryCondition)
        } else if a == 0.0 {
            Ok(BoundaryCondition::Dirichlet(-c / b))
        } else if b == 0.0 {
            Ok(BoundaryCondition::Neumann(-c / a))
        } else {
            Ok(BoundaryCondition::Mixed { a, b, c })
        }
    }

    /// Residual of the condition at the state `(y, y')`.
    fn residual(&self, y: f64, dy: f64) -> f64 {
        match *self {
            BoundaryCondition::Dirichlet(value) => y - value,
            BoundaryCondition::Neumann(value) => dy - value,
            BoundaryCondition::Mixed { a, b, c } => a * dy + b * y + c,
        }
    }
}

/// Strategy interface of the boundary-value solvers. Row 0 of the result
/// holds the grid nodes and row 1 the solution `y`; shooting also carries
/// `y'` in row 2.
pub trait BvpMethod {
    fn solve(
        &self,
        eq: &DiffEquation,
        left: BoundaryCondition,
        right: BoundaryCondition,
        grid: &Grid,
    ) -> Result<Trajectory, Error>;
}

/// Search bracket for the free initial-state component.
const NU_BRACKET: (f64, f64) = (0.0, 4.0);

/// Shooting reduction of the boundary-value problem.
///
/// The left condition pins one component of the initial state and frees the
/// other as the parameter `ν`; `ν` is found by driving the right condition's
/// residual at `x = b` to zero with scalar Newton iteration, then one final
/// integration at the found `ν` produces the trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Shooting<M = RungeKutta4> {
    method: M,
    precision: f64,
    max_iterations: usize,
}

impl Shooting<RungeKutta4> {
    pub fn new(precision: f64, max_iterations: usize) -> Self {
        Shooting::with_method(RungeKutta4, precision, max_iterations)
    }
}

impl<M> Shooting<M> {
    pub fn with_method(method: M, precision: f64, max_iterations: usize) -> Self {
        Shooting {
            method,
            precision,
            max_iterations,
        }
    }
}

impl Default for Shooting<RungeKutta4> {
    fn default() -> Self {
        Shooting::new(1e-3, 10)
    }
}

/// Initial state implied by the left condition with free parameter `ν`:
/// Dirichlet pins `y(a)` and frees `y'(a)`, Neumann pins `y'(a)` and frees
/// `y(a)`, a mixed condition makes `y(a)` an affine function of `ν`.
fn initial_state(cond: BoundaryCondition, nu: f64) -> Vector2<f64> {
    match cond {
        BoundaryCondition::Dirichlet(value) => Vector2::new(value, nu),
        BoundaryCondition::Neumann(value) => Vector2::new(nu, value),
        BoundaryCondition::Mixed { a, b, c } => Vector2::new(-c / b - a / b * nu, nu),
    }
}

impl<M: OdeMethod> BvpMethod for Shooting<M> {
    fn solve(
        &self,
        eq: &DiffEquation,
        left: BoundaryCondition,
        right: BoundaryCondition,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let n = grid.node_count();
        if n < self.method.min_nodes() {
            return Err(Error::GridTooSmall {
                len: n,
                min: self.method.min_nodes(),
            });
        }

        let shoot = |nu: f64| -> Trajectory {
            self.method
                .integrate(eq, initial_state(left, nu), grid)
                .expect("stencil was checked against the grid above")
        };
        let miss = |nu: f64| -> f64 {
            let tr = shoot(nu);
            let last = tr.ncols() - 1;
            right.residual(tr[(1, last)], tr[(2, last)])
        };

        let root = nonlinear::newton(
            &miss,
            NU_BRACKET.0,
            NU_BRACKET.1,
            self.precision,
            self.max_iterations,
        );
        if root.iterations == self.max_iterations {
            log::warn!(
                "shooting parameter search stopped at the iteration cap, \
                 the boundary residual may exceed the tolerance"
            );
        } else {
            log::debug!(
                "shooting parameter nu = {} found in {} iterations",
                root.x,
                root.iterations
            );
        }

        Ok(shoot(root.x))
    }
}

/// Finite differences: a central second-order stencil at every interior
/// node, a first-order one-sided row at a Neumann/Mixed end, and direct
/// substitution at a Dirichlet end (which drops that endpoint from the
/// unknowns). The assembled system is tridiagonal.
///
/// Requires `p(x) ≠ 0` at every node; this is not re-validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiniteDifference;

impl BvpMethod for FiniteDifference {
    fn solve(
        &self,
        eq: &DiffEquation,
        left: BoundaryCondition,
        right: BoundaryCondition,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let xs = grid.nodes();
        let n = xs.len();
        if n < 4 {
            return Err(Error::GridTooSmall { len: n, min: 4 });
        }
        let h = grid.step();

        // central-difference row (g1, g2, g3 | g4) at an interior node
        let g1 = |x: f64| 1.0 - 0.5 * h * (eq.q)(x) / (eq.p)(x);
        let g2 = |x: f64| h * h * (eq.r)(x) / (eq.p)(x) - 2.0;
        let g3 = |x: f64| 1.0 + 0.5 * h * (eq.q)(x) / (eq.p)(x);
        let g4 = |x: f64| -h * h * (eq.f)(x) / (eq.p)(x);

        // a Dirichlet endpoint is known and drops out of the unknowns
        let lo = match left {
            BoundaryCondition::Dirichlet(_) => 1,
            _ => 0,
        };
        let hi = match right {
            BoundaryCondition::Dirichlet(_) => n - 2,
            _ => n - 1,
        };
        let m = hi - lo + 1;

        let mut coeffs = MatrixXx3::zeros(m);
        let mut rhs = DVector::zeros(m);

        for (row, i) in (lo..=hi).enumerate() {
            if i == 0 {
                // one-sided difference for y'(a)
                match left {
                    BoundaryCondition::Neumann(value) => {
                        coeffs[(row, 1)] = -1.0;
                        coeffs[(row, 2)] = 1.0;
                        rhs[row] = h * value;
                    }
                    BoundaryCondition::Mixed { a, b, c } => {
                        coeffs[(row, 1)] = b * h - a;
                        coeffs[(row, 2)] = a;
                        rhs[row] = -c * h;
                    }
                    BoundaryCondition::Dirichlet(_) => unreachable!(),
                }
            } else if i == n - 1 {
                match right {
                    BoundaryCondition::Neumann(value) => {
                        coeffs[(row, 0)] = -1.0;
                        coeffs[(row, 1)] = 1.0;
                        rhs[row] = h * value;
                    }
                    BoundaryCondition::Mixed { a, b, c } => {
                        coeffs[(row, 0)] = -a;
                        coeffs[(row, 1)] = a + b * h;
                        rhs[row] = -c * h;
                    }
                    BoundaryCondition::Dirichlet(_) => unreachable!(),
                }
            } else {
                let x = xs[i];
                coeffs[(row, 0)] = g1(x);
                coeffs[(row, 1)] = g2(x);
                coeffs[(row, 2)] = g3(x);
                rhs[row] = g4(x);

                // a substituted Dirichlet neighbour moves to the right side
                if i == 1 {
                    if let BoundaryCondition::Dirichlet(value) = left {
                        coeffs[(row, 0)] = 0.0;
                        rhs[row] -= g1(x) * value;
                    }
                }
                if i == n - 2 {
                    if let BoundaryCondition::Dirichlet(value) = right {
                        coeffs[(row, 2)] = 0.0;
                        rhs[row] -= g3(x) * value;
                    }
                }
            }
        }

        let solution = linear::solve_tridiagonal(&coeffs, &rhs)?;

        let mut out = DMatrix::zeros(2, n);
        for i in 0..n {
            out[(0, i)] = xs[i];
        }
        if let BoundaryCondition::Dirichlet(value) = left {
            out[(1, 0)] = value;
        }
        if let BoundaryCondition::Dirichlet(value) = right {
            out[(1, n - 1)] = value;
        }
        for (row, i) in (lo..=hi).enumerate() {
            out[(1, i)] = solution[row];
        }

        Ok(out)
    }
}
