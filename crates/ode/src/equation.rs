//! Second-order linear equations in coefficient form.

use nalgebra::Vector2;

/// Coefficient function of the equation, `x ↦ value`.
pub type Coeff = Box<dyn Fn(f64) -> f64>;

/// The equation `p(x)·y'' + q(x)·y' + r(x)·y + f(x) = 0`.
///
/// `p` must not vanish on any grid the equation is solved over; solvers
/// divide by it without re-checking.
pub struct DiffEquation {
    pub p: Coeff,
    pub q: Coeff,
    pub r: Coeff,
    pub f: Coeff,
}

impl DiffEquation {
    pub fn new(
        p: impl Fn(f64) -> f64 + 'static,
        q: impl Fn(f64) -> f64 + 'static,
        r: impl Fn(f64) -> f64 + 'static,
        f: impl Fn(f64) -> f64 + 'static,
    ) -> Self {
        DiffEquation {
            p: Box::new(p),
            q: Box::new(q),
            r: Box::new(r),
            f: Box::new(f),
        }
    }

    /// Right-hand side of the first-order form `Y' = F(x, Y)`, where
    /// `Y = (y, y')` and `F = (y', a·y' + b·y + c)` with `a = −q/p`,
    /// `b = −r/p`, `c = −f/p`.
    pub fn system(&self, x: f64, y: &Vector2<f64>) -> Vector2<f64> {
        let p = (self.p)(x);
        let a = -(self.q)(x) / p;
        let b = -(self.r)(x) / p;
        let c = -(self.f)(x) / p;
        Vector2::new(y[1], a * y[1] + b * y[0] + c)
    }
}
