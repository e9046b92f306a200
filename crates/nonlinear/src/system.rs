//! Root finding for systems `F(x) = 0` over a hyper-rectangle.

use nalgebra::{DMatrix, DVector, RealField};
use num_traits::NumCast;

use linear::LuFactors;

use crate::scalar::sign;
use crate::{Error, MethodResult};

/// Step of the forward difference for partial derivatives.
const PARTIAL_STEP: f64 = 1e-4;
/// Per-dimension sampling step for bounds over the search box.
const SCAN_STEP: f64 = 1e-2;

fn eval<T, F>(funcs: &[F], x: &DVector<T>) -> DVector<T>
where
    T: RealField + Copy,
    F: Fn(&DVector<T>) -> T,
{
    DVector::from_iterator(funcs.len(), funcs.iter().map(|f| f(x)))
}

fn partial<T, F>(f: &F, x: &DVector<T>, j: usize) -> T
where
    T: RealField + NumCast + Copy,
    F: Fn(&DVector<T>) -> T,
{
    let dx = T::from(PARTIAL_STEP).unwrap();
    let mut shifted = x.clone();
    shifted[j] += dx;
    (f(&shifted) - f(x)) / dx
}

fn norm_max<T: RealField + Copy>(v: &DVector<T>) -> T {
    v.iter()
        .fold(T::zero(), |m, &c| if c.abs() > m { c.abs() } else { m })
}

/// Largest value of `g` over the box `[lo, hi]`, sampled on a uniform grid.
fn max_over_box<T, G>(g: &G, lo: &DVector<T>, hi: &DVector<T>) -> T
where
    T: RealField + NumCast + Copy,
    G: Fn(&DVector<T>) -> T,
{
    let step = T::from(SCAN_STEP).unwrap();
    let mut x = lo.clone();
    let mut best = T::zero();
    scan_dim(g, lo, hi, step, &mut x, 0, &mut best);
    best
}

fn scan_dim<T, G>(
    g: &G,
    lo: &DVector<T>,
    hi: &DVector<T>,
    step: T,
    x: &mut DVector<T>,
    dim: usize,
    best: &mut T,
) where
    T: RealField + NumCast + Copy,
    G: Fn(&DVector<T>) -> T,
{
    if dim == lo.len() {
        let v = g(x);
        if v > *best {
            *best = v;
        }
        return;
    }
    let mut t = lo[dim];
    while t < hi[dim] {
        x[dim] = t;
        scan_dim(g, lo, hi, step, x, dim + 1, best);
        t += step;
    }
}

/// Fixed-point iteration for the system over the box `[s1, s2]`, seeded at
/// its center.
///
/// Every coordinate gets its own contraction map
/// `φ_i(x) = x_i − (sign ∂f_i/∂x_i(s1) / M_i)·f_i(x)`, with `M_i` the largest
/// max-norm of `∇f_i` over the box. Stops when `‖x_{n+1} − x_n‖_∞ ≤ eps` or
/// at the cap.
pub fn fixed_point_system<T, F>(
    funcs: &[F],
    s1: &DVector<T>,
    s2: &DVector<T>,
    eps: T,
    max_iterations: usize,
) -> MethodResult<DVector<T>>
where
    T: RealField + NumCast + Copy,
    F: Fn(&DVector<T>) -> T,
{
    let n = funcs.len();

    let scales: Vec<(T, T)> = funcs
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let dir = sign(partial(f, s1, i));
            let grad_norm = |x: &DVector<T>| {
                let grad = DVector::from_iterator(n, (0..n).map(|j| partial(f, x, j)));
                norm_max(&grad)
            };
            (dir, max_over_box(&grad_norm, s1, s2))
        })
        .collect();

    let mut last = (s1 + s2) / T::from(2.0).unwrap();
    for it in 1..=max_iterations {
        let x = DVector::from_fn(n, |i, _| {
            let (dir, m) = scales[i];
            last[i] - dir / m * funcs[i](&last)
        });
        if norm_max(&(&x - &last)) <= eps {
            return MethodResult { x, iterations: it };
        }
        last = x;
    }

    MethodResult {
        x: last,
        iterations: max_iterations,
    }
}

/// Newton's method for the system, seeded at the center of `[s1, s2]`.
///
/// Each update solves `J(x_n)·Δ = −F(x_n)` through the dense LU solver, then
/// `x_{n+1} = x_n + Δ`; the Jacobian is a forward-difference approximation.
/// Stops when `‖Δ‖_∞ ≤ eps` or at the cap; fails only when a Jacobian turns
/// out singular.
pub fn newton_system<T, F>(
    funcs: &[F],
    s1: &DVector<T>,
    s2: &DVector<T>,
    eps: T,
    max_iterations: usize,
) -> Result<MethodResult<DVector<T>>, Error>
where
    T: RealField + NumCast + Copy,
    F: Fn(&DVector<T>) -> T,
{
    let n = funcs.len();
    log::trace!("newton iteration over {} equations", n);

    let mut last = (s1 + s2) / T::from(2.0).unwrap();
    for it in 1..=max_iterations {
        let jac = DMatrix::from_fn(n, n, |i, j| partial(&funcs[i], &last, j));
        let rhs = -eval(funcs, &last);
        let delta = LuFactors::decompose(&jac).solve(&rhs)?;
        let x = &last + &delta;

        if norm_max(&delta) <= eps {
            return Ok(MethodResult { x, iterations: it });
        }
        last = x;
    }

    Ok(MethodResult {
        x: last,
        iterations: max_iterations,
    })
}
