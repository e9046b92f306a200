//! Three-diagonal systems solved by forward elimination and back
//! substitution.

use nalgebra::{allocator::Allocator, Const, DefaultAllocator, Dim, OMatrix, OVector, RealField, U2, U3};

use crate::Error;

/// Solves a tridiagonal system given as `n × 3` coefficient rows
/// `(sub, diag, super)` plus a right-hand side.
///
/// Row `i` encodes `sub·x_{i-1} + diag·x_i + super·x_{i+1} = rhs_i`; the
/// first row's `sub` and the last row's `super` are ignored. Forward
/// elimination produces run coefficients `(p_i, q_i)` with
/// `x_i = p_i·x_{i+1} + q_i`; back substitution unwinds them. A zero pivot
/// `diag + sub·p_{i-1}` means the system has no unique solution.
pub fn solve_tridiagonal<T, D>(
    coeffs: &OMatrix<T, D, U3>,
    rhs: &OVector<T, D>,
) -> Result<OVector<T, D>, Error>
where
    T: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<T, D, U3> + Allocator<T, D, U2> + Allocator<T, D>,
{
    let (dim, _) = coeffs.shape_generic();
    let n = coeffs.nrows();
    if n == 0 {
        return Ok(OVector::zeros_generic(dim, Const::<1>));
    }

    let mut run = OMatrix::<T, D, U2>::zeros_generic(dim, Const::<2>);
    for i in 0..n {
        let (a, b, c) = (coeffs[(i, 0)], coeffs[(i, 1)], coeffs[(i, 2)]);
        let d = rhs[i];

        if i == 0 {
            if b == T::zero() {
                return Err(Error::ZeroPivot { row: 0 });
            }
            run[(0, 0)] = -c / b;
            run[(0, 1)] = d / b;
        } else {
            let t = b + a * run[(i - 1, 0)];
            if t == T::zero() {
                return Err(Error::ZeroPivot { row: i });
            }
            run[(i, 0)] = -c / t;
            run[(i, 1)] = (d - a * run[(i - 1, 1)]) / t;
        }
    }

    let mut x = OVector::zeros_generic(dim, Const::<1>);
    x[n - 1] = run[(n - 1, 1)];
    for i in (0..n - 1).rev() {
        x[i] = run[(i, 0)] * x[i + 1] + run[(i, 1)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{matrix, vector};

    use super::*;
    use crate::LuFactors;

    #[test]
    fn solves_a_small_system() {
        let coeffs = matrix![
            0.0, 2.0, 1.0;
            1.0, 3.0, 1.0;
            1.0, 4.0, 1.0;
            1.0, 5.0, 0.0;
        ];
        let rhs = vector![4.0, 10.0, 18.0, 23.0];
        let x = solve_tridiagonal(&coeffs, &rhs).unwrap();
        assert_relative_eq!(x, vector![1.0, 2.0, 3.0, 4.0], epsilon = 1e-6);
    }

    #[test]
    fn matches_the_dense_solver_on_the_densified_system() {
        let coeffs = matrix![
            0.0, 4.0, -1.0;
            1.0, 5.0, 2.0;
            -2.0, 6.0, 1.0;
            1.0, 4.0, 0.0;
        ];
        let rhs = vector![1.0, -3.0, 2.0, 5.0];
        let x = solve_tridiagonal(&coeffs, &rhs).unwrap();

        let dense = matrix![
            4.0, -1.0, 0.0, 0.0;
            1.0, 5.0, 2.0, 0.0;
            0.0, -2.0, 6.0, 1.0;
            0.0, 0.0, 1.0, 4.0;
        ];
        let expected = LuFactors::decompose(&dense).solve(&rhs).unwrap();
        assert_relative_eq!(x, expected, epsilon = 1e-6);
    }

    #[test]
    fn zero_pivot_is_reported() {
        let coeffs = matrix![
            0.0, 0.0, 1.0;
            1.0, 2.0, 0.0;
        ];
        let rhs = vector![1.0, 1.0];
        assert!(matches!(
            solve_tridiagonal(&coeffs, &rhs),
            Err(Error::ZeroPivot { row: 0 })
        ));
    }
}
