use crate::error::{Result, WallError};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Wrapper around a dense matrix of exact rationals.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub matrix: DMatrix<BigRational>,
}

impl LinearSystem {
    /// Create a linear system from a matrix (rows x cols).
    pub fn new(rows: Vec<Vec<BigRational>>) -> Self {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        Self::with_columns(rows, n_cols)
    }

    /// Like [`LinearSystem::new`] but keeps the column count when there are
    /// no rows, so the kernel of the empty system is the whole space.
    pub fn with_columns(rows: Vec<Vec<BigRational>>, n_cols: usize) -> Self {
        let n_rows = rows.len();
        debug_assert!(rows.iter().all(|r| r.len() == n_cols), "ragged rows");
        let flat: Vec<BigRational> = rows.into_iter().flatten().collect();
        Self {
            matrix: DMatrix::from_row_slice(n_rows, n_cols, &flat),
        }
    }

    /// Integer rows, the common case for exponent data.
    pub fn from_integer_rows(rows: &[Vec<i64>]) -> Self {
        Self::new(
            rows.iter()
                .map(|r| {
                    r.iter()
                        .map(|&a| BigRational::from_integer(BigInt::from(a)))
                        .collect()
                })
                .collect(),
        )
    }

    /// Return the dimensions (rows, cols) of the matrix.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.matrix.nrows(), self.matrix.ncols())
    }

    /// Reduced row echelon form and the pivot column of each nonzero row.
    fn reduced_row_echelon(&self) -> (DMatrix<BigRational>, Vec<usize>) {
        let mut a = self.matrix.clone();
        let (n_rows, n_cols) = a.shape();
        let mut pivots = Vec::new();
        let mut row = 0usize;
        for col in 0..n_cols {
            if row >= n_rows {
                break;
            }
            let Some(sel) = (row..n_rows).find(|&r| !a[(r, col)].is_zero()) else {
                continue;
            };
            a.swap_rows(row, sel);

            let pivot = a[(row, col)].clone();
            if !pivot.is_one() {
                for c in col..n_cols {
                    let scaled = &a[(row, c)] / &pivot;
                    a[(row, c)] = scaled;
                }
            }
            for r in 0..n_rows {
                if r == row || a[(r, col)].is_zero() {
                    continue;
                }
                let factor = a[(r, col)].clone();
                for c in col..n_cols {
                    let delta = &factor * &a[(row, c)];
                    a[(r, c)] -= delta;
                }
            }
            pivots.push(col);
            row += 1;
        }
        (a, pivots)
    }

    /// Right nullspace by exact Gauss-Jordan elimination.
    ///
    /// One basis vector per free column, in column order; the free entry of
    /// each vector is 1.
    pub fn nullspace(&self) -> Vec<Vec<BigRational>> {
        let n_cols = self.matrix.ncols();
        let (a, pivots) = self.reduced_row_echelon();
        let mut is_pivot = vec![false; n_cols];
        for &pc in &pivots {
            is_pivot[pc] = true;
        }

        let mut basis = Vec::new();
        for free in (0..n_cols).filter(|&c| !is_pivot[c]) {
            let mut v = vec![BigRational::zero(); n_cols];
            v[free] = BigRational::one();
            for (r, &pc) in pivots.iter().enumerate() {
                v[pc] = -a[(r, free)].clone();
            }
            basis.push(v);
        }
        basis
    }

    pub fn kernel_dimension(&self) -> usize {
        self.matrix.ncols() - self.rank()
    }

    /// Rank over the rationals.
    pub fn rank(&self) -> usize {
        if self.matrix.nrows() == 0 || self.matrix.ncols() == 0 {
            return 0;
        }
        self.reduced_row_echelon().1.len()
    }

    /// The generator of a one-dimensional kernel.
    pub fn unique_kernel_vector(&self) -> Result<Vec<BigRational>> {
        let mut basis = self.nullspace();
        if basis.len() != 1 {
            return Err(WallError::DegenerateConfiguration {
                expected: 1,
                found: basis.len(),
            });
        }
        Ok(basis.remove(0))
    }
}

/// Exact dot product of two rational vectors.
pub fn dot(a: &[BigRational], b: &[BigRational]) -> BigRational {
    a.iter()
        .zip(b)
        .fold(BigRational::zero(), |acc, (x, y)| acc + x * y)
}
