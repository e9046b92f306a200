//! Cross-checks of the two boundary-value strategies on a problem with a
//! known closed-form solution: `(2x+1)·y'' + 4x·y' − 4·y = 0` with
//! `y(0) = 1` and `y'(1) + 2·y(1) − 3 = 0`, solved by `y = x + e^{−2x}`.

use nalgebra::DVector;

use ode::{
    max_absolute_error, BoundaryCondition, BvpMethod, DiffEquation, FiniteDifference, Grid,
    Shooting,
};

fn problem() -> (DiffEquation, BoundaryCondition, BoundaryCondition) {
    let eq = DiffEquation::new(|x| 2.0 * x + 1.0, |x| 4.0 * x, |_| -4.0, |_| 0.0);
    let left = BoundaryCondition::Dirichlet(1.0);
    let right = BoundaryCondition::Mixed {
        a: 1.0,
        b: 2.0,
        c: -3.0,
    };
    (eq, left, right)
}

fn exact(xs: &DVector<f64>) -> DVector<f64> {
    xs.map(|x| x + (-2.0 * x).exp())
}

#[test]
fn shooting_matches_the_exact_solution() {
    let (eq, left, right) = problem();
    let grid = Grid::new(0.0, 1.0, 0.01);
    let tr = Shooting::new(1e-6, 20).solve(&eq, left, right, &grid).unwrap();
    let error = max_absolute_error(&tr.row(1).transpose(), &exact(&grid.nodes()));
    assert!(error < 1e-4, "shooting error {} too large", error);
}

#[test]
fn finite_difference_matches_the_exact_solution() {
    let (eq, left, right) = problem();
    let grid = Grid::new(0.0, 1.0, 0.01);
    let tr = FiniteDifference.solve(&eq, left, right, &grid).unwrap();
    let error = max_absolute_error(&tr.row(1).transpose(), &exact(&grid.nodes()));
    assert!(error < 1e-2, "finite-difference error {} too large", error);
}

#[test]
fn both_strategies_agree() {
    let (eq, left, right) = problem();
    let grid = Grid::new(0.0, 1.0, 0.01);
    let shot = Shooting::new(1e-6, 20).solve(&eq, left, right, &grid).unwrap();
    let fd = FiniteDifference.solve(&eq, left, right, &grid).unwrap();
    let difference =
        max_absolute_error(&shot.row(1).transpose(), &fd.row(1).transpose());
    assert!(difference < 1e-2, "strategies differ by {}", difference);
}

#[test]
fn triples_classify_into_the_same_conditions() {
    let (_, left, right) = problem();
    assert_eq!(
        BoundaryCondition::from_coefficients(0.0, 1.0, -1.0).unwrap(),
        left
    );
    assert_eq!(
        BoundaryCondition::from_coefficients(1.0, 2.0, -3.0).unwrap(),
        right
    );
}
