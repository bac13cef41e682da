/// An error type for the linalg module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LinalgError {
    /// Error when the input holds no samples.
    #[error("Cannot compute statistics of empty data")]
    EmptyData,

    /// Error when a matrix is expected to be square.
    #[error("Matrix must be square. Got: {0}x{1}")]
    NotSquare(usize, usize),

    /// Error when two operands have incompatible shapes.
    #[error("Shape mismatch. Got: {0}x{1}, expected: {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),
}
