#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency Blackbox
//!
//! Contracts for the models a saliency pipeline interrogates. A
//! [`ScalarScorer`] maps an image to one score (class confidence, similarity
//! to a query); a [`Detector`] maps an image to a set of detections. The
//! saliency generators never call these traits themselves: callers run the
//! oracle over the occluded images and hand the outputs to the generators,
//! so the aggregation stays pure and the model stays a black box.
//!
//! ## Example
//!
//! ```rust
//! use ndarray::{Array3, ArrayView3};
//! use saliency_blackbox::{BlackboxError, ScalarScorer};
//! use saliency_plugin::Plugin;
//!
//! struct MeanBrightness;
//!
//! impl Plugin for MeanBrightness {
//!     fn name(&self) -> &'static str {
//!         "mean-brightness"
//!     }
//! }
//!
//! impl ScalarScorer for MeanBrightness {
//!     fn score(&self, image: &ArrayView3<'_, f32>) -> Result<f32, BlackboxError> {
//!         let len = image.len().max(1);
//!         Ok(image.iter().sum::<f32>() / len as f32)
//!     }
//! }
//!
//! let image = Array3::<f32>::from_elem((4, 4, 1), 0.25);
//! assert_eq!(MeanBrightness.score(&image.view())?, 0.25);
//! # Ok::<(), BlackboxError>(())
//! ```

mod detector;
mod error;
mod scorer;

pub use detector::Detector;
pub use error::BlackboxError;
pub use scorer::{ScalarScorer, SessionContext};
