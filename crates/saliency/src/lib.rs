#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency
//!
//! Top-level crate bundling the saliency workspace: data model, plugin
//! machinery, mask providers, map generators and oracle contracts, plus the
//! process-wide [`Plugins`] set built from the crate defaults.
//!
//! A typical pipeline:
//!
//! 1. pick a mask provider from [`Plugins::perturbers`] and generate masks
//!    for the reference image,
//! 2. run the model over the occluded copies,
//! 3. hand masks and model outputs to a generator from
//!    [`Plugins::scalar_generators`] or [`Plugins::detection_generators`].
//!
//! See the `classification_saliency` and `detection_saliency` examples for
//! the full round trip.

#[doc(inline)]
pub use saliency_core as core;

#[doc(inline)]
pub use saliency_plugin as plugin;

#[doc(inline)]
pub use saliency_perturb as perturb;

#[doc(inline)]
pub use saliency_blackbox as blackbox;

#[doc(inline)]
pub use saliency_occlusion as occlusion;

mod plugins;
pub use plugins::Plugins;
