//! Uniform grids.

use nalgebra::DVector;

/// Slack when deciding how many steps fit into the interval.
const SPAN_TOLERANCE: f64 = 1e-9;

/// Uniform grid with step `h` over `[a, b]`: nodes `x_i = a + i·h` for
/// `i = 0..=N` with `N = ceil((b − a)/h)` within floating tolerance. The last
/// node may overshoot `b` when the step does not divide the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    a: f64,
    b: f64,
    h: f64,
}

impl Grid {
    /// Panics if `h ≤ 0` or `b ≤ a`.
    pub fn new(a: f64, b: f64, h: f64) -> Self {
        assert!(h > 0.0, "grid step must be positive");
        assert!(b > a, "grid interval must be non-empty");
        Grid { a, b, h }
    }

    pub fn start(&self) -> f64 {
        self.a
    }

    pub fn end(&self) -> f64 {
        self.b
    }

    pub fn step(&self) -> f64 {
        self.h
    }

    /// Number of nodes, `N + 1`.
    pub fn node_count(&self) -> usize {
        let span = (self.b - self.a) / self.h;
        (span - SPAN_TOLERANCE).ceil() as usize + 1
    }

    /// Node `x_i = a + i·h`.
    pub fn node(&self, i: usize) -> f64 {
        self.a + i as f64 * self.h
    }

    pub fn nodes(&self) -> DVector<f64> {
        DVector::from_fn(self.node_count(), |i, _| self.node(i))
    }
}
