//! # Dense matrices for homogeneous 2D transforms
//!
//! A small, immutable matrix of `f64` values. Every operation returns a fresh
//! matrix that owns its own buffer, so results never alias their operands.
//!
//! ## Conventions
//!
//! - Entries are indexed `(row, col)`, zero based, and stored row-major.
//! - The `_h2d` constructors build 3x3 homogeneous matrices. Points are the
//!   column `[x, y, 1]`, see [`Matrix::point_h2d`].
//! - [`Matrix::translation_h2d`] keeps the translation in the bottom row
//!   (row-vector convention). Callers mixing it with column points must
//!   account for that themselves.

mod error;

pub use error::{MatrixError, MatrixOp};

use glam::DVec2;
use std::fmt::{self, Display};

/// An `m x n` matrix of doubles.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from a list of rows.
    ///
    /// The row count is the outer length and the column count is the length
    /// of the first row.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty, if the first row is empty, or if any row
    /// has a different length than the first one.
    pub fn new(values: Vec<Vec<f64>>) -> Self {
        let rows = values.len();
        assert!(rows > 0, "matrix must have at least one row");
        let cols = values[0].len();
        assert!(cols > 0, "matrix must have at least one column");

        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in values.into_iter().enumerate() {
            assert_eq!(
                row.len(),
                cols,
                "row {i} has {} entries, expected {cols}",
                row.len()
            );
            data.extend(row);
        }

        Self { rows, cols, data }
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `n x n` identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn identity(n: usize) -> Self {
        Self::identity_rect(n, n)
    }

    /// The `m x n` matrix with 1.0 wherever the row index equals the column
    /// index and 0.0 everywhere else.
    ///
    /// # Panics
    ///
    /// Panics if `m` or `n` is zero.
    pub fn identity_rect(m: usize, n: usize) -> Self {
        assert!(m > 0 && n > 0, "identity must be at least 1x1, got {m}x{n}");
        let mut result = Self::zeros(m, n);
        for i in 0..m.min(n) {
            result.data[i * n + i] = 1.0;
        }
        result
    }

    /// Homogeneous rotation by `theta` radians.
    pub fn rotation_h2d(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::from([
            [cos, -sin, 0.0],
            [sin, cos, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Homogeneous translation by `(tx, ty)`, stored in the bottom row.
    pub fn translation_h2d(tx: f64, ty: f64) -> Self {
        Self::from([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [tx, ty, 1.0],
        ])
    }

    /// Places `x` and `y` on the diagonal, which makes this a scaling matrix.
    pub fn vector_h2d(x: f64, y: f64) -> Self {
        Self::from([
            [x, 0.0, 0.0],
            [0.0, y, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// The homogeneous column `[x, y, 1]`.
    pub fn point_h2d(x: f64, y: f64) -> Self {
        Self::from([[x], [y], [1.0]])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The entry at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the matrix.
    pub fn entry(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.rows && j < self.cols,
            "entry ({i}, {j}) out of range for a {}x{} matrix",
            self.rows,
            self.cols
        );
        self.data[i * self.cols + j]
    }

    /// Matrix product `self . other`.
    ///
    /// Fails unless `self.cols() == other.rows()`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::mismatch(MatrixOp::Dot, self, other));
        }

        let mut result = Self::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[i * self.cols + k] * other.data[k * other.cols + j];
                }
                result.data[i * other.cols + j] = sum;
            }
        }
        Ok(result)
    }

    /// Element-wise sum. Both operands must have the same shape.
    pub fn plus(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(MatrixError::mismatch(MatrixOp::Plus, self, other));
        }

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Applies this 3x3 homogeneous transform to the point `(x, y)` and
    /// normalizes by the resulting third coordinate.
    ///
    /// A zero third coordinate yields infinite or NaN components, as IEEE
    /// division does.
    pub fn project_h2d(&self, x: f64, y: f64) -> Result<DVec2, MatrixError> {
        let point = Self::point_h2d(x, y);
        if self.rows != 3 || self.cols != 3 {
            return Err(MatrixError::mismatch(MatrixOp::Project, self, &point));
        }

        let column = self.dot(&point)?;
        let w = column.entry(2, 0);
        Ok(DVec2::new(column.entry(0, 0) / w, column.entry(1, 0) / w))
    }

    /// Whether both matrices share a shape and every pair of entries differs
    /// by at most `epsilon`.
    pub fn approx_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl<const M: usize, const N: usize> From<[[f64; N]; M]> for Matrix {
    fn from(values: [[f64; N]; M]) -> Self {
        Self::new(values.iter().map(|row| row.to_vec()).collect())
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            for value in row {
                write!(f, "{:?}\t", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
