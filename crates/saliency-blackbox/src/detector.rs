use ndarray::{Array3, ArrayView3};

use saliency_core::Detections;
use saliency_plugin::Plugin;

use crate::error::BlackboxError;

/// Object detection oracle.
///
/// Maps one image to a [`Detections`] set. Detectors that do not report an
/// objectness confidence fill the column with `1.0`.
pub trait Detector: Plugin {
    /// Detect objects in a single image.
    fn detect(&self, image: &ArrayView3<'_, f32>) -> Result<Detections, BlackboxError>;

    /// Detect objects in a batch of images, one set per image in order.
    fn detect_batch(&self, images: &[Array3<f32>]) -> Result<Vec<Detections>, BlackboxError> {
        images.iter().map(|image| self.detect(&image.view())).collect()
    }
}
