//! Error estimation against a reference solution or between step sizes.

use nalgebra::DVector;

/// Largest pointwise deviation from a reference solution.
pub fn max_absolute_error(actual: &DVector<f64>, predicted: &DVector<f64>) -> f64 {
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .fold(0.0, f64::max)
}

/// Pointwise Runge–Romberg estimate of the error of a method with order of
/// accuracy `p`, from the same solve at step `h` (`coarse`) and step `h/2`
/// (`fine`). Node `i` of the coarse solution lines up with node `2i` of the
/// fine one; the caller supplies the order, no inference is attempted.
pub fn runge_romberg_error(coarse: &DVector<f64>, fine: &DVector<f64>, p: i32) -> DVector<f64> {
    let denom = 2.0_f64.powi(p) - 1.0;
    DVector::from_fn(coarse.len(), |i, _| {
        ((coarse[i] - fine[2 * i]) / denom).abs()
    })
}

/// Richardson extrapolation of the step-`h/2` solution one order up, on the
/// coarse nodes.
pub fn richardson_extrapolate(coarse: &DVector<f64>, fine: &DVector<f64>, p: i32) -> DVector<f64> {
    let denom = 2.0_f64.powi(p) - 1.0;
    DVector::from_fn(coarse.len(), |i, _| {
        fine[2 * i] + (fine[2 * i] - coarse[i]) / denom
    })
}
