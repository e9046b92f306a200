//! Initial-value integrators over the first-order form of the equation.

use nalgebra::{DMatrix, Vector2};

use crate::{DiffEquation, Error, Grid, Trajectory};

/// Strategy interface of the integrators.
///
/// A trajectory here is a `3 × n` matrix: row 0 the grid nodes, rows 1 and 2
/// the state `(y, y')` at each node. Integrators do not try to detect
/// numerical blow-up; NaN and overflow propagate to the caller.
pub trait OdeMethod {
    /// Smallest grid the method's stencil supports.
    fn min_nodes(&self) -> usize {
        2
    }

    /// Integrates the equation from `y0 = (y(a), y'(a))` across the grid.
    /// The only failure mode is a grid shorter than
    /// [`min_nodes`](Self::min_nodes).
    fn integrate(
        &self,
        eq: &DiffEquation,
        y0: Vector2<f64>,
        grid: &Grid,
    ) -> Result<Trajectory, Error>;
}

fn write_state(out: &mut Trajectory, i: usize, x: f64, y: &Vector2<f64>) {
    out[(0, i)] = x;
    out[(1, i)] = y[0];
    out[(2, i)] = y[1];
}

/// Explicit Euler scheme, first order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl OdeMethod for Euler {
    fn integrate(
        &self,
        eq: &DiffEquation,
        y0: Vector2<f64>,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let xs = grid.nodes();
        let h = grid.step();
        let mut out = DMatrix::zeros(3, xs.len());

        let mut y = y0;
        write_state(&mut out, 0, xs[0], &y);
        for i in 1..xs.len() {
            y += eq.system(xs[i - 1], &y) * h;
            write_state(&mut out, i, xs[i], &y);
        }

        Ok(out)
    }
}

/// Euler predictor with a trapezoidal correction pass, second order. The
/// predictor trajectory comes from a plain Euler sweep at the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedEuler;

impl OdeMethod for ImprovedEuler {
    fn integrate(
        &self,
        eq: &DiffEquation,
        y0: Vector2<f64>,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let predicted = Euler.integrate(eq, y0, grid)?;
        let xs = grid.nodes();
        let h = grid.step();
        let mut out = DMatrix::zeros(3, xs.len());

        let mut y = y0;
        write_state(&mut out, 0, xs[0], &y);
        for i in 1..xs.len() {
            let ahead = Vector2::new(predicted[(1, i)], predicted[(2, i)]);
            y += (eq.system(xs[i - 1], &y) + eq.system(xs[i], &ahead)) * (0.5 * h);
            write_state(&mut out, i, xs[i], &y);
        }

        Ok(out)
    }
}

/// Classic four-stage Runge–Kutta scheme, fourth order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl OdeMethod for RungeKutta4 {
    fn integrate(
        &self,
        eq: &DiffEquation,
        y0: Vector2<f64>,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let xs = grid.nodes();
        let h = grid.step();
        let mut out = DMatrix::zeros(3, xs.len());

        let mut y = y0;
        write_state(&mut out, 0, xs[0], &y);
        for i in 1..xs.len() {
            let x = xs[i - 1];
            let k1 = eq.system(x, &y) * h;
            let k2 = eq.system(x + 0.5 * h, &(y + k1 * 0.5)) * h;
            let k3 = eq.system(x + 0.5 * h, &(y + k2 * 0.5)) * h;
            let k4 = eq.system(x + h, &(y + k3)) * h;
            y += (k1 + k2 * 2.0 + k3 * 2.0 + k4) / 6.0;
            write_state(&mut out, i, xs[i], &y);
        }

        Ok(out)
    }
}

/// Four-step Adams–Bashforth predictor, fourth order. The first four nodes
/// are produced by the wrapped bootstrap method run at the same step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adams<M = RungeKutta4> {
    bootstrap: M,
}

impl<M: OdeMethod> Adams<M> {
    pub fn new(bootstrap: M) -> Self {
        Adams { bootstrap }
    }
}

impl<M: OdeMethod> OdeMethod for Adams<M> {
    fn min_nodes(&self) -> usize {
        4
    }

    fn integrate(
        &self,
        eq: &DiffEquation,
        y0: Vector2<f64>,
        grid: &Grid,
    ) -> Result<Trajectory, Error> {
        let xs = grid.nodes();
        let n = xs.len();
        if n < self.min_nodes() {
            return Err(Error::GridTooSmall {
                len: n,
                min: self.min_nodes(),
            });
        }

        let h = grid.step();
        let lead = Grid::new(xs[0], xs[3], h);
        let boot = self.bootstrap.integrate(eq, y0, &lead)?;

        let mut out = DMatrix::zeros(3, n);
        for i in 0..4 {
            out.set_column(i, &boot.column(i));
        }

        let h24 = h / 24.0;
        for i in 4..n {
            let f: Vec<Vector2<f64>> = (i - 4..i)
                .map(|j| eq.system(out[(0, j)], &Vector2::new(out[(1, j)], out[(2, j)])))
                .collect();
            let y = Vector2::new(out[(1, i - 1)], out[(2, i - 1)])
                + (f[3] * 55.0 - f[2] * 59.0 + f[1] * 37.0 - f[0] * 9.0) * h24;
            write_state(&mut out, i, xs[i], &y);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// `y'' − y = 0`, `y(0) = y'(0) = 1`; the solution is `eˣ`.
    fn exponential_growth() -> DiffEquation {
        DiffEquation::new(|_| 1.0, |_| 0.0, |_| -1.0, |_| 0.0)
    }

    #[test]
    fn euler_is_exact_on_linear_solutions() {
        // y'' = 0 with y(0) = 0, y'(0) = 1, so y = x
        let eq = DiffEquation::new(|_| 1.0, |_| 0.0, |_| 0.0, |_| 0.0);
        let grid = Grid::new(0.0, 1.0, 0.1);
        let tr = Euler.integrate(&eq, Vector2::new(0.0, 1.0), &grid).unwrap();
        for i in 0..grid.node_count() {
            assert_relative_eq!(tr[(1, i)], tr[(0, i)], epsilon = 1e-12);
        }
    }

    #[test]
    fn improved_euler_is_exact_on_quadratics() {
        // y'' − 2 = 0 with y(0) = y'(0) = 0, so y = x²
        let eq = DiffEquation::new(|_| 1.0, |_| 0.0, |_| 0.0, |_| -2.0);
        let grid = Grid::new(0.0, 1.0, 0.1);
        let tr = ImprovedEuler
            .integrate(&eq, Vector2::new(0.0, 0.0), &grid)
            .unwrap();
        for i in 0..grid.node_count() {
            let x = tr[(0, i)];
            assert_relative_eq!(tr[(1, i)], x * x, epsilon = 1e-12);
        }
    }

    #[test]
    fn runge_kutta_tracks_the_exponential() {
        let grid = Grid::new(0.0, 1.0, 0.1);
        let tr = RungeKutta4
            .integrate(&exponential_growth(), Vector2::new(1.0, 1.0), &grid)
            .unwrap();
        let last = grid.node_count() - 1;
        assert_relative_eq!(tr[(1, last)], 1.0_f64.exp(), epsilon = 1e-5);
    }

    #[test]
    fn adams_tracks_the_exponential() {
        let grid = Grid::new(0.0, 1.0, 0.05);
        let tr = Adams::<RungeKutta4>::default()
            .integrate(&exponential_growth(), Vector2::new(1.0, 1.0), &grid)
            .unwrap();
        let last = grid.node_count() - 1;
        assert_relative_eq!(tr[(1, last)], 1.0_f64.exp(), epsilon = 1e-4);
    }

    #[test]
    fn adams_requires_four_nodes() {
        let grid = Grid::new(0.0, 0.2, 0.1);
        let result = Adams::<RungeKutta4>::default().integrate(
            &exponential_growth(),
            Vector2::new(1.0, 1.0),
            &grid,
        );
        assert!(matches!(
            result,
            Err(Error::GridTooSmall { len: 3, min: 4 })
        ));
    }
}
