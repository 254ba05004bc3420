use thiserror::Error;

use saliency_core::DetectionError;

/// Errors produced by scoring oracles.
#[derive(Debug, Error)]
pub enum BlackboxError {
    /// The implementation does not support the requested operation.
    ///
    /// Construction paths like [`crate::ScalarScorer::from_session`] are
    /// optional; implementations without them report this error instead of
    /// silently degrading.
    #[error("operation {operation} is not supported by {implementation}")]
    UnsupportedOperation {
        /// Name of the unsupported operation.
        operation: &'static str,
        /// Concrete type that rejected it.
        implementation: &'static str,
    },

    /// The underlying model failed to produce an output.
    #[error("inference failed: {0}")]
    Inference(String),

    /// A detector produced malformed detection rows.
    #[error(transparent)]
    InvalidDetections(#[from] DetectionError),
}
