//! Errors raised by linear pipeline operators.

use crate::schema::ConfigError;

use super::step::DelegateError;

/// Linear pipeline operator errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid pipeline configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Step index {index} out of range for pipeline of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("Pipeline length {len} outside [{min_length}, {max_length}] for this operator")]
    LengthLimit {
        len: usize,
        min_length: usize,
        max_length: usize,
    },
    #[error("Pipeline step failed: {0}")]
    Delegate(#[source] DelegateError),
}

// A nested pipeline reports its own `PipelineError` through the step
// contract; unwrap it so callers match on the same variants at every depth.
impl From<DelegateError> for PipelineError {
    fn from(err: DelegateError) -> Self {
        match err.downcast::<PipelineError>() {
            Ok(inner) => *inner,
            Err(err) => Self::Delegate(err),
        }
    }
}


pub type Result<T> = std::result::Result<T, PipelineError>;
