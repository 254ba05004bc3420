#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency Perturb
//!
//! Occlusion mask providers and mask application. A [`PerturbImage`] plugin
//! turns an image size into a stack of boolean masks (`true` marks preserved
//! pixels); [`occlude`] applies one mask to an image by writing a fill value
//! into the occluded region. The batch convenience [`PerturbImage::augment`]
//! pairs each mask with its occluded image.
//!
//! Two strategies ship with the crate: a deterministic [`SlidingWindow`] scan
//! and the RISE-style seeded [`RandomGrid`].
//!
//! ## Example
//!
//! ```rust
//! use ndarray::Array3;
//! use saliency_perturb::{ImageSize, PerturbImage, SlidingWindow};
//!
//! let image = Array3::<f32>::from_elem((8, 8, 1), 1.0);
//! let perturber = SlidingWindow::new(
//!     ImageSize { width: 4, height: 4 },
//!     ImageSize { width: 4, height: 4 },
//! )?;
//!
//! let (images, masks) = perturber.augment(&image.view(), 0.0)?;
//! assert_eq!(images.len(), 4);
//! assert_eq!(masks.dim(), (4, 8, 8));
//! # Ok::<(), saliency_perturb::PerturbError>(())
//! ```

mod perturb;
mod random_grid;
mod sliding_window;

pub use perturb::{occlude, ImageSize, PerturbError, PerturbImage};
pub use random_grid::RandomGrid;
pub use sliding_window::SlidingWindow;
