use ndarray::{Array2, Array3, ArrayView3, Axis};
use rayon::prelude::*;

use saliency_core::Detections;
use saliency_plugin::{config, Config, Plugin, PluginError};

use crate::correspond;
use crate::error::SaliencyError;
use crate::weights;

/// Generator of per-detection saliency maps.
///
/// Implementations are pure: identical inputs yield identical stacks, and a
/// failed call leaves no partial result.
pub trait DetectionSaliencyMapGenerator: Plugin {
    /// Generate one `[M, H, W]` stack with a map in `[0, 1]` per reference
    /// detection.
    ///
    /// # Arguments
    ///
    /// * `reference` - The M detections on the unperturbed image.
    /// * `perturbed` - One detection set per occluded image, length N. Set
    ///   cardinalities are independent of M; only non-empty sets must share
    ///   the reference's `5 + K` row width.
    /// * `masks` - Preservation masks with shape (N, H, W), `true` = preserved.
    fn generate(
        &self,
        reference: &Detections,
        perturbed: &[Detections],
        masks: ArrayView3<'_, bool>,
    ) -> Result<Array3<f32>, SaliencyError>;

    /// Invoke the generator as a callable; forwards to
    /// [`DetectionSaliencyMapGenerator::generate`].
    fn call(
        &self,
        reference: &Detections,
        perturbed: &[Detections],
        masks: ArrayView3<'_, bool>,
    ) -> Result<Array3<f32>, SaliencyError> {
        self.generate(reference, perturbed, masks)
    }
}

/// Occlusion-weighted detection saliency.
///
/// For every reference detection and every perturbation the generator finds
/// the best-continuing candidate ([`correspond::best_correspondence`]) and
/// measures the evidence the perturbation removed
/// ([`correspond::evidence_drop`]); a vanished detection counts as a full
/// drop. The drops then feed the same per-pixel weighting as the scalar
/// generator, one map per reference detection.
#[derive(Debug, Clone, Copy)]
pub struct DetectionOcclusionSaliency {
    min_iou: f32,
}

impl DetectionOcclusionSaliency {
    /// Registry name of this plugin.
    pub const NAME: &'static str = "detection-occlusion";

    /// Default correspondence threshold.
    pub const DEFAULT_MIN_IOU: f32 = 0.25;

    /// Create the generator with the default threshold.
    pub fn new() -> Self {
        Self {
            min_iou: Self::DEFAULT_MIN_IOU,
        }
    }

    /// Set the minimum IoU for a candidate to count as a continuation.
    ///
    /// Values lie in `[0, 1]`; zero still requires a positive overlap.
    pub fn with_min_iou(mut self, min_iou: f32) -> Self {
        self.min_iou = min_iou;
        self
    }

    /// The configured correspondence threshold.
    pub fn min_iou(&self) -> f32 {
        self.min_iou
    }
}

impl Default for DetectionOcclusionSaliency {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DetectionOcclusionSaliency {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config(&self) -> Config {
        let mut c = Config::new();
        c.insert("min_iou".to_string(), f64::from(self.min_iou).into());
        c
    }

    fn set_config(&mut self, config: &Config) -> Result<(), PluginError> {
        config::unknown_keys(config, self.name(), &["min_iou"])?;
        if let Some(value) = config::number(config, self.name(), "min_iou")? {
            if !(0.0..=1.0).contains(&value) {
                return Err(PluginError::InvalidOption {
                    plugin: self.name(),
                    key: "min_iou",
                    expected: "number in [0, 1]",
                });
            }
            self.min_iou = value as f32;
        }
        Ok(())
    }
}

impl DetectionSaliencyMapGenerator for DetectionOcclusionSaliency {
    fn generate(
        &self,
        reference: &Detections,
        perturbed: &[Detections],
        masks: ArrayView3<'_, bool>,
    ) -> Result<Array3<f32>, SaliencyError> {
        let (num_masks, height, width) = masks.dim();
        if num_masks == 0 {
            return Err(SaliencyError::InsufficientEvidence);
        }
        if perturbed.len() != num_masks {
            return Err(SaliencyError::ShapeMismatch {
                context: "perturbed detection sets",
                expected: num_masks.to_string(),
                found: perturbed.len().to_string(),
            });
        }

        // empty sets carry no rows to disagree with the reference layout
        let columns = reference.width();
        for (i, candidates) in perturbed.iter().enumerate() {
            if !candidates.is_empty() && candidates.width() != columns {
                return Err(SaliencyError::ShapeMismatch {
                    context: "detection columns",
                    expected: columns.to_string(),
                    found: format!("{} in perturbed set {}", candidates.width(), i),
                });
            }
        }

        let num_refs = reference.len();
        let mut maps = Array3::zeros((num_refs, height, width));
        if num_refs == 0 {
            return Ok(maps);
        }

        log::debug!(
            "generating detection saliency for {} references over {} perturbations",
            num_refs,
            num_masks
        );

        let mut drops = Array2::<f32>::zeros((num_refs, num_masks));
        for (r, reference_det) in reference.iter().enumerate() {
            for (i, candidates) in perturbed.iter().enumerate() {
                drops[[r, i]] = correspond::evidence_drop(&reference_det, candidates, self.min_iou);
            }
        }

        maps.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(r, mut map)| {
                weights::weighted_mean_into(&masks, drops.row(r), &mut map);
                weights::normalize_unit_range(&mut map);
            });

        Ok(maps)
    }
}
