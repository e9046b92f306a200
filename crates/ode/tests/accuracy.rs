//! Order-of-accuracy properties of the integrators and the step-halving
//! error estimate, on `y'' − 4x·y' + (4x² − 2)·y = 0` with `y(0) = 1`,
//! `y'(0) = 1`, solved by `y = (1 + x)·e^{x²}`.

use nalgebra::{DVector, Vector2};

use ode::{
    max_absolute_error, richardson_extrapolate, runge_romberg_error, DiffEquation, Grid,
    OdeMethod, RungeKutta4,
};

fn equation() -> DiffEquation {
    DiffEquation::new(|_| 1.0, |x| -4.0 * x, |x| 4.0 * x * x - 2.0, |_| 0.0)
}

fn exact(xs: &DVector<f64>) -> DVector<f64> {
    xs.map(|x| (1.0 + x) * (x * x).exp())
}

fn solve_y(h: f64) -> (DVector<f64>, DVector<f64>) {
    let grid = Grid::new(0.0, 1.0, h);
    let tr = RungeKutta4
        .integrate(&equation(), Vector2::new(1.0, 1.0), &grid)
        .unwrap();
    (grid.nodes(), tr.row(1).transpose())
}

#[test]
fn halving_the_step_divides_the_error_by_sixteen() {
    let (xs1, y1) = solve_y(0.1);
    let (xs2, y2) = solve_y(0.05);
    let e1 = max_absolute_error(&y1, &exact(&xs1));
    let e2 = max_absolute_error(&y2, &exact(&xs2));
    let ratio = e1 / e2;
    assert!(
        ratio > 10.0 && ratio < 24.0,
        "error ratio {} is not close to 16",
        ratio
    );
}

#[test]
fn runge_romberg_stays_below_the_raw_error() {
    let (xs1, y1) = solve_y(0.1);
    let (_, y2) = solve_y(0.05);
    let raw = max_absolute_error(&y1, &exact(&xs1));
    let estimated = runge_romberg_error(&y1, &y2, 4).max();
    assert!(estimated > 0.0);
    assert!(estimated < raw, "estimate {} not below {}", estimated, raw);
}

#[test]
fn richardson_extrapolation_improves_the_fine_solution() {
    let (xs1, y1) = solve_y(0.1);
    let (_, y2) = solve_y(0.05);
    let exact_coarse = exact(&xs1);
    let improved = richardson_extrapolate(&y1, &y2, 4);
    let fine_on_coarse = DVector::from_fn(xs1.len(), |i, _| y2[2 * i]);
    assert!(
        max_absolute_error(&improved, &exact_coarse)
            < max_absolute_error(&fine_on_coarse, &exact_coarse)
    );
}
