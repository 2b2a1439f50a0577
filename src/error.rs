use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero denominator, inverse of zero, or a row divided by zero.
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid fraction literal: {0:?}")]
    InvalidFormat(String),

    #[error("shape mismatch in {operation}: {reason}")]
    Shape {
        operation: &'static str,
        reason: String,
    },

    #[error("index ({column}, {row}) out of bounds for a {cols}x{rows} matrix")]
    OutOfBounds {
        column: usize,
        row: usize,
        cols: usize,
        rows: usize,
    },

    /// REF -> RREF was requested on a matrix that is not in row echelon form.
    #[error("matrix is not in row echelon form")]
    MalformedInput,

    #[error("matrix is singular")]
    Singular,
}

pub type Result<T> = std::result::Result<T, Error>;
