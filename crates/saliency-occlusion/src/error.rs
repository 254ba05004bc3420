use thiserror::Error;

/// Errors produced by saliency map generation.
///
/// Shape validation runs before any computation, so a generator either
/// returns a complete result or leaves nothing behind.
#[derive(Debug, Error)]
pub enum SaliencyError {
    /// Input arrays disagree on a dimension.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Which inputs disagreed.
        context: &'static str,
        /// The dimension the reference input established.
        expected: String,
        /// The dimension actually found.
        found: String,
    },

    /// No perturbed samples were provided.
    #[error("saliency generation requires at least one perturbed sample")]
    InsufficientEvidence,
}
