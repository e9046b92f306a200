//! Dense LU decomposition with partial pivoting.

use nalgebra::{allocator::Allocator, Const, DefaultAllocator, Dim, OMatrix, OVector, RealField};

use crate::Error;

/// The factorization `P·A = L·U` of a square matrix, with `L` unit lower
/// triangular, `U` upper triangular and `P` a row permutation.
#[derive(Clone, Debug)]
pub struct LuFactors<T, D: Dim>
where
    DefaultAllocator: Allocator<T, D, D> + Allocator<usize, D>,
{
    l: OMatrix<T, D, D>,
    u: OMatrix<T, D, D>,
    /// `perm[i]` is the row of `A` that lands in row `i` of `P·A`.
    perm: OVector<usize, D>,
}

impl<T, D> LuFactors<T, D>
where
    T: RealField + Copy,
    D: Dim,
    DefaultAllocator: Allocator<T, D, D> + Allocator<T, D> + Allocator<usize, D>,
{
    /// Factors `A` using Gaussian elimination with partial pivoting.
    ///
    /// The pivot row for column `k` is the one with the largest squared
    /// leading element (the first such row on ties), which keeps the
    /// elimination multipliers small. A pivot that is still exactly zero
    /// after the swap marks a singular leading minor: the column records no
    /// multipliers and elimination moves on. The factorization itself never
    /// fails; singularity surfaces later as a zero diagonal of `U` in
    /// [`solve`](Self::solve) or a zero [`determinant`](Self::determinant).
    pub fn decompose(a: &OMatrix<T, D, D>) -> Self {
        let (dim, _) = a.shape_generic();
        let n = a.nrows();

        let mut u = a.clone_owned();
        let mut l = OMatrix::identity_generic(dim, dim);
        let mut perm = OVector::from_fn_generic(dim, Const::<1>, |i, _| i);

        for k in 0..n.saturating_sub(1) {
            let mut piv = k;
            for i in (k + 1)..n {
                if u[(i, k)] * u[(i, k)] > u[(piv, k)] * u[(piv, k)] {
                    piv = i;
                }
            }

            if piv != k {
                u.swap_rows(k, piv);
                perm.swap_rows(k, piv);
                // multipliers recorded to the left move with their rows
                for t in 0..k {
                    l.swap((k, t), (piv, t));
                }
            }

            // singular leading minor, nothing to eliminate in this column
            if u[(k, k)] == T::zero() {
                continue;
            }

            for i in (k + 1)..n {
                let c = u[(i, k)] / u[(k, k)];
                for j in k..n {
                    let ukj = u[(k, j)];
                    u[(i, j)] -= c * ukj;
                }
                l[(i, k)] = c;
            }
        }

        LuFactors { l, u, perm }
    }

    /// Solves `A·x = b` from the stored factors: forward substitution for
    /// `z = L⁻¹(P·b)`, then back substitution for `x = U⁻¹·z`.
    pub fn solve(&self, b: &OVector<T, D>) -> Result<OVector<T, D>, Error> {
        let (dim, _) = self.u.shape_generic();
        let n = self.u.nrows();

        let mut z = OVector::zeros_generic(dim, Const::<1>);
        for i in 0..n {
            let mut c = b[self.perm[i]];
            for j in 0..i {
                c -= self.l[(i, j)] * z[j];
            }
            z[i] = c;
        }

        let mut x = OVector::zeros_generic(dim, Const::<1>);
        for i in (0..n).rev() {
            let mut c = z[i];
            for j in (i + 1)..n {
                c -= self.u[(i, j)] * x[j];
            }
            if self.u[(i, i)] == T::zero() {
                return Err(Error::SingularMatrix { row: i });
            }
            x[i] = c / self.u[(i, i)];
        }

        Ok(x)
    }

    /// `det(A) = det(P)·Π U[i,i]`; exactly zero when `A` is singular.
    pub fn determinant(&self) -> T {
        let mut det = self.permutation_parity();
        for i in 0..self.u.nrows() {
            det *= self.u[(i, i)];
        }
        det
    }

    /// Inverse assembled column by column, one solve per basis vector.
    pub fn inverse(&self) -> Result<OMatrix<T, D, D>, Error> {
        let (dim, _) = self.u.shape_generic();
        let n = self.u.nrows();

        let mut inv = OMatrix::zeros_generic(dim, dim);
        let mut e = OVector::zeros_generic(dim, Const::<1>);
        for i in 0..n {
            e[i] = T::one();
            let x = self.solve(&e)?;
            inv.set_column(i, &x);
            e[i] = T::zero();
        }

        Ok(inv)
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> &OMatrix<T, D, D> {
        &self.l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> &OMatrix<T, D, D> {
        &self.u
    }

    /// Row permutation as an index map: entry `i` is the row of `A` placed at
    /// row `i` of `P·A`.
    pub fn permutation(&self) -> &OVector<usize, D> {
        &self.perm
    }

    /// The permutation as a dense matrix `P`.
    pub fn p(&self) -> OMatrix<T, D, D> {
        let (dim, _) = self.u.shape_generic();
        let mut p = OMatrix::zeros_generic(dim, dim);
        for i in 0..self.perm.len() {
            p[(i, self.perm[i])] = T::one();
        }
        p
    }

    /// Sign of the permutation: the parity of the transposition count needed
    /// to sort the index map back to identity.
    fn permutation_parity(&self) -> T {
        let mut idx = self.perm.clone_owned();
        let n = idx.len();
        let mut sign = T::one();

        for i in 0..n {
            if idx[i] == i {
                continue;
            }
            let mut j = i;
            for k in (i + 1)..n {
                if idx[k] == i {
                    j = k;
                    break;
                }
            }
            idx.swap_rows(i, j);
            sign = -sign;
        }

        sign
    }
}
