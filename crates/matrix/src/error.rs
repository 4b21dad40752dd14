use crate::Matrix;
use std::fmt;

/// The operation that rejected its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixOp {
    Dot,
    Plus,
    Project,
}

impl fmt::Display for MatrixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dot => write!(f, "dot"),
            Self::Plus => write!(f, "plus"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// Error type for matrix operations.
///
/// Both operands are kept so the failure can be diagnosed from the message
/// alone.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixError {
    DimensionMismatch {
        op: MatrixOp,
        left: Matrix,
        right: Matrix,
    },
}

impl MatrixError {
    pub(crate) fn mismatch(op: MatrixOp, left: &Matrix, right: &Matrix) -> Self {
        Self::DimensionMismatch {
            op,
            left: left.clone(),
            right: right.clone(),
        }
    }

    pub fn op(&self) -> MatrixOp {
        match self {
            Self::DimensionMismatch { op, .. } => *op,
        }
    }
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { op, left, right } => write!(
                f,
                "Dimensions are not equal ({op}): {}x{} vs {}x{}\nMatrix 1:\n{left}\nMatrix 2:\n{right}",
                left.rows(),
                left.cols(),
                right.rows(),
                right.cols(),
            ),
        }
    }
}

impl std::error::Error for MatrixError {}
