use ndarray::{Array2, ArrayView1, ArrayView3};

use saliency_plugin::Plugin;

use crate::error::SaliencyError;
use crate::weights;

/// Generator of saliency maps for scalar model scores.
///
/// Implementations are pure: identical inputs yield identical maps, and a
/// failed call leaves no partial result.
pub trait ScalarSaliencyMapGenerator: Plugin {
    /// Generate one `[H, W]` saliency map in `[0, 1]`.
    ///
    /// # Arguments
    ///
    /// * `masks` - Preservation masks with shape (N, H, W), `true` = preserved.
    /// * `scores` - The model's score on each occluded image, length N.
    fn generate(
        &self,
        masks: ArrayView3<'_, bool>,
        scores: ArrayView1<'_, f32>,
    ) -> Result<Array2<f32>, SaliencyError>;

    /// Invoke the generator as a callable; forwards to
    /// [`ScalarSaliencyMapGenerator::generate`].
    fn call(
        &self,
        masks: ArrayView3<'_, bool>,
        scores: ArrayView1<'_, f32>,
    ) -> Result<Array2<f32>, SaliencyError> {
        self.generate(masks, scores)
    }
}

/// Occlusion-weighted scalar saliency.
///
/// Averages, per pixel, the scores observed while the pixel was occluded,
/// then normalizes the map to `[0, 1]`. High scores light up the pixels that
/// were occluded when they occurred; never-occluded pixels carry no evidence
/// and stay at zero. Feed confidence drops (reference score minus occluded
/// score) when high saliency should mark the pixels whose occlusion hurt the
/// model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarOcclusionSaliency;

impl ScalarOcclusionSaliency {
    /// Registry name of this plugin.
    pub const NAME: &'static str = "scalar-occlusion";

    /// Create the generator.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ScalarOcclusionSaliency {
    fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl ScalarSaliencyMapGenerator for ScalarOcclusionSaliency {
    fn generate(
        &self,
        masks: ArrayView3<'_, bool>,
        scores: ArrayView1<'_, f32>,
    ) -> Result<Array2<f32>, SaliencyError> {
        let (num_masks, height, width) = masks.dim();
        log::debug!(
            "generating scalar saliency from {} masks at {}x{}",
            num_masks,
            width,
            height
        );

        let mut map = weights::occlusion_weighted_mean(&masks, scores)?;
        weights::normalize_unit_range(&mut map.view_mut());
        Ok(map)
    }
}
