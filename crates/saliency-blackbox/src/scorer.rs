use ndarray::{Array3, ArrayView3};

use saliency_plugin::Plugin;

use crate::error::BlackboxError;

/// Relevance-feedback session state.
///
/// Holds the exemplar descriptors a user marked relevant and irrelevant
/// during an interactive query session. Scorers that support it can be
/// built directly from this state via [`ScalarScorer::from_session`], so a
/// saliency map can explain the session's current relevance model.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Descriptors of exemplars marked relevant.
    pub positives: Vec<Vec<f32>>,
    /// Descriptors of exemplars marked irrelevant.
    pub negatives: Vec<Vec<f32>>,
}

/// Scalar scoring oracle.
///
/// Maps one image to one score: a class confidence, a similarity to a query,
/// a relevance estimate. Higher means more of whatever the oracle measures.
pub trait ScalarScorer: Plugin {
    /// Score a single image.
    fn score(&self, image: &ArrayView3<'_, f32>) -> Result<f32, BlackboxError>;

    /// Score a batch of images, one score per image in order.
    ///
    /// The default loops over [`ScalarScorer::score`]; batching oracles
    /// override it.
    fn score_batch(&self, images: &[Array3<f32>]) -> Result<Vec<f32>, BlackboxError> {
        images.iter().map(|image| self.score(&image.view())).collect()
    }

    /// Build a scorer from a relevance-feedback session.
    ///
    /// Most oracles cannot be derived from session state; the default
    /// reports [`BlackboxError::UnsupportedOperation`] naming the concrete
    /// type so callers can surface the gap instead of ignoring it.
    fn from_session(session: &SessionContext) -> Result<Self, BlackboxError>
    where
        Self: Sized,
    {
        let _ = session;
        Err(BlackboxError::UnsupportedOperation {
            operation: "from_session",
            implementation: std::any::type_name::<Self>(),
        })
    }
}
