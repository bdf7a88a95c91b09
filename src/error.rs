use thiserror::Error;

/// Crate error type. Dataset and framework failures are fatal and panic
/// at the call site; only argument validation is reported as an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested example index does not exist in the batch.
    #[error("example index {index} is out of range for a batch of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
