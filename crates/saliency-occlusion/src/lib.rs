#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency Occlusion
//!
//! Turns the outputs of a black-box model on occluded images into per-pixel
//! saliency heat-maps. Two generators cover the two model families:
//!
//! - [`ScalarOcclusionSaliency`] explains a scalar score (class confidence,
//!   similarity): pixels whose occlusion kept the score high are salient.
//! - [`DetectionOcclusionSaliency`] explains every detection of an object
//!   detector, matching detections across perturbations by box overlap and
//!   class profile, one heat-map per reference detection.
//!
//! Both weight each occluded pixel by the evidence observed when it was
//! occluded and normalize every map to `[0, 1]`. Generators are stateless;
//! repeat calls on identical inputs produce identical maps.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::{array, Array3};
//! use saliency_occlusion::{ScalarOcclusionSaliency, ScalarSaliencyMapGenerator};
//!
//! // two masks: one occludes the top row, one the bottom row
//! let mut masks = Array3::from_elem((2, 2, 2), true);
//! masks[[0, 0, 0]] = false;
//! masks[[0, 0, 1]] = false;
//! masks[[1, 1, 0]] = false;
//! masks[[1, 1, 1]] = false;
//!
//! // the model scored the occluded copies 0.1 and 0.9
//! let scores = array![0.1f32, 0.9];
//!
//! let generator = ScalarOcclusionSaliency::new();
//! let map = generator.generate(masks.view(), scores.view())?;
//! assert_eq!(map.dim(), (2, 2));
//! assert_eq!(map[[1, 0]], 1.0);
//! assert_eq!(map[[0, 0]], 0.0);
//! # Ok::<(), saliency_occlusion::SaliencyError>(())
//! ```

/// Detection correspondence search across perturbations.
pub mod correspond;

/// Mask-weighted accumulation and normalization shared by the generators.
pub mod weights;

mod detection;
mod error;
mod scalar;

pub use detection::{DetectionOcclusionSaliency, DetectionSaliencyMapGenerator};
pub use error::SaliencyError;
pub use scalar::{ScalarOcclusionSaliency, ScalarSaliencyMapGenerator};
