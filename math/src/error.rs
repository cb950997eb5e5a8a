use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// Two operands (matrix/matrix or matrix/vector) disagree in size.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The determinant is zero, so no inverse exists.
    #[error("can't take inverse if matrix determinant is zero")]
    SingularMatrix,

    #[error("vector needs at least {required} components, found {found}")]
    VectorTooShort { required: usize, found: usize },

    #[error("can't normalize vector with zero magnitude")]
    ZeroMagnitude,

    #[error("no submatrix of matrix with zero size")]
    ZeroSizedMatrix,

    #[error("cell ({row}, {col}) is outside a {size}x{size} matrix")]
    IndexOutOfBounds { row: usize, col: usize, size: usize },
}

pub type MathResult<T> = Result<T, MathError>;
