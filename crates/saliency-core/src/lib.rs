#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency Core
//!
//! Shared data model for occlusion-based saliency: validated detection
//! matrices, bounding-box geometry and class-score similarity metrics.
//!
//! ## Detection layout
//!
//! A detection is a row vector `[x1, y1, x2, y2, objectness, class_1..class_K]`
//! with `K >= 1` class scores. [`Detections`] wraps an owned `[n, 5 + K]`
//! matrix and hands out zero-copy [`Detection`] row views.
//!
//! ## Example
//!
//! ```rust
//! use saliency_core::Detections;
//!
//! let dets = Detections::from_rows(&[
//!     vec![0.0, 0.0, 10.0, 10.0, 0.9, 0.1, 0.8],
//!     vec![5.0, 5.0, 15.0, 15.0, 0.7, 0.6, 0.2],
//! ])?;
//!
//! let first = dets.get(0).ok_or("empty")?;
//! assert_eq!(first.top_class(), (1, 0.8));
//! assert!(first.bbox().iou(&dets.get(1).ok_or("empty")?.bbox()) > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Axis-aligned bounding boxes and intersection-over-union.
pub mod bbox;

/// Validated detection matrices and per-row accessors.
pub mod detection;

/// Similarity metrics over class-score vectors.
pub mod metrics;

pub use bbox::BoundingBox;
pub use detection::{Detection, DetectionError, Detections};
