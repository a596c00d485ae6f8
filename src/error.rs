//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Provides semantic variants for argument validation and degenerate numeric
//! inputs; there are no I/O or retryable failure modes.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Target shape {target_rows}x{target_cols} exceeds input shape {rows}x{cols}")]
    InvalidShape {
        target_rows: usize,
        target_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Degenerate statistics region: {detail}")]
    DegenerateRegion { detail: String },
}
