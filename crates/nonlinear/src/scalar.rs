//! Root finding for a single equation `f(x) = 0` on an interval.

use nalgebra::RealField;
use num_traits::NumCast;

use crate::MethodResult;

/// Step of the forward difference used when no analytic derivative is given.
const DERIVATIVE_STEP: f64 = 1e-5;
/// Sampling step for interval bounds such as `max |f'|`.
const SCAN_STEP: f64 = 1e-3;

pub(crate) fn sign<T: RealField + Copy>(x: T) -> T {
    if x < T::zero() {
        -T::one()
    } else if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

fn max_on_interval<T, F>(f: F, a: T, b: T) -> T
where
    T: RealField + NumCast + Copy,
    F: Fn(T) -> T,
{
    let step = T::from(SCAN_STEP).unwrap();
    let mut best = T::zero();
    let mut x = a;
    while x < b {
        let v = f(x);
        if v > best {
            best = v;
        }
        x += step;
    }
    best
}

/// Fixed-point iteration for `f(x) = 0` on `[a, b]`, seeded at the midpoint.
///
/// The contraction map is `φ(x) = x − (sign f'(a) / M)·f(x)` with
/// `M = max |f'|` over the interval, which keeps `|φ'| ≤ q < 1` for
/// well-behaved `f`. Iteration stops once `|x_{n+1} − x_n| ≤ (1−q)/q·eps`
/// or at the cap, whichever comes first.
pub fn fixed_point<T, F>(f: F, a: T, b: T, eps: T, max_iterations: usize) -> MethodResult<T>
where
    T: RealField + NumCast + Copy,
    F: Fn(T) -> T,
{
    let dx = T::from(DERIVATIVE_STEP).unwrap();
    let df = |x: T| (f(x + dx) - f(x)) / dx;

    let m = max_on_interval(|x| df(x).abs(), a, b);
    let dir = sign(df(a));
    let phi = |x: T| x - dir / m * f(x);
    let dphi = |x: T| (phi(x + dx) - phi(x)) / dx;
    let q = max_on_interval(|x| dphi(x).abs(), a, b);
    let threshold = (T::one() - q) / q * eps;

    let mut last = (a + b) / T::from(2.0).unwrap();
    for i in 1..=max_iterations {
        let x = phi(last);
        if (x - last).abs() <= threshold {
            return MethodResult { x, iterations: i };
        }
        last = x;
    }

    MethodResult {
        x: last,
        iterations: max_iterations,
    }
}

/// Newton's method with an explicit derivative, seeded at the interval
/// midpoint; stops when `|x_{n+1} − x_n| ≤ eps` or at the cap.
pub fn newton_with_derivative<T, F, G>(
    f: F,
    df: G,
    a: T,
    b: T,
    eps: T,
    max_iterations: usize,
) -> MethodResult<T>
where
    T: RealField + NumCast + Copy,
    F: Fn(T) -> T,
    G: Fn(T) -> T,
{
    let mut last = (a + b) / T::from(2.0).unwrap();
    for i in 1..=max_iterations {
        let x = last - f(last) / df(last);
        if (x - last).abs() <= eps {
            return MethodResult { x, iterations: i };
        }
        last = x;
    }

    MethodResult {
        x: last,
        iterations: max_iterations,
    }
}

/// Newton's method with a forward-difference derivative.
pub fn newton<T, F>(f: F, a: T, b: T, eps: T, max_iterations: usize) -> MethodResult<T>
where
    T: RealField + NumCast + Copy,
    F: Fn(T) -> T,
{
    let dx = T::from(DERIVATIVE_STEP).unwrap();
    newton_with_derivative(&f, |x| (f(x + dx) - f(x)) / dx, a, b, eps, max_iterations)
}
