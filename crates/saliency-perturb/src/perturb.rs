use ndarray::{Array3, ArrayView2, ArrayView3, Axis, Zip};
use thiserror::Error;

use saliency_plugin::{config, Config, Plugin, PluginError};

pub(crate) fn positive_dimension(
    config: &Config,
    plugin: &'static str,
    key: &'static str,
) -> Result<Option<usize>, PluginError> {
    match config::integer(config, plugin, key)? {
        None => Ok(None),
        Some(0) => Err(PluginError::InvalidOption {
            plugin,
            key,
            expected: "positive integer",
        }),
        Some(value) => Ok(Some(value as usize)),
    }
}

/// Errors produced by mask providers and mask application.
#[derive(Debug, Error)]
pub enum PerturbError {
    /// A strategy parameter is outside its valid range.
    #[error("invalid perturbation parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of the accepted values.
        reason: &'static str,
    },

    /// The mask does not match the image it is applied to.
    #[error("mask size {mask_width}x{mask_height} does not match image size {image_width}x{image_height}")]
    MaskSizeMismatch {
        /// Mask width in pixels.
        mask_width: usize,
        /// Mask height in pixels.
        mask_height: usize,
        /// Image width in pixels.
        image_width: usize,
        /// Image height in pixels.
        image_height: usize,
    },

    /// Masks were requested for an image with no pixels.
    #[error("image size must be non-zero, got {width}x{height}")]
    ZeroImageSize {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },
}

/// Size of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

/// Replace the occluded region of an image with a fill value.
///
/// `mask` marks preserved pixels `true`; every other pixel has all its
/// channels set to `fill`. The input image is left untouched.
///
/// # Arguments
///
/// * `image` - The input image with shape (H, W, C).
/// * `mask` - The preservation mask with shape (H, W).
/// * `fill` - Value written into occluded pixels.
///
/// # Example
///
/// ```
/// use ndarray::{array, Array3};
/// use saliency_perturb::occlude;
///
/// let image = Array3::<f32>::from_elem((2, 2, 1), 1.0);
/// let mask = array![[true, false], [true, true]];
///
/// let occluded = occlude(&image.view(), &mask.view(), 0.5)?;
/// assert_eq!(occluded[[0, 1, 0]], 0.5);
/// assert_eq!(occluded[[0, 0, 0]], 1.0);
/// # Ok::<(), saliency_perturb::PerturbError>(())
/// ```
pub fn occlude<T: Copy>(
    image: &ArrayView3<'_, T>,
    mask: &ArrayView2<'_, bool>,
    fill: T,
) -> Result<Array3<T>, PerturbError> {
    let (height, width, _channels) = image.dim();
    let (mask_height, mask_width) = mask.dim();
    if mask_height != height || mask_width != width {
        return Err(PerturbError::MaskSizeMismatch {
            mask_width,
            mask_height,
            image_width: width,
            image_height: height,
        });
    }

    let mut occluded = image.to_owned();
    Zip::from(occluded.lanes_mut(Axis(2)))
        .and(mask)
        .for_each(|mut lane, &keep| {
            if !keep {
                lane.fill(fill);
            }
        });

    Ok(occluded)
}

/// Mask provider capability.
///
/// Implementations turn an image size into a stack of `[N, H, W]` boolean
/// preservation masks. Degenerate masks (all `true` or all `false`) are
/// legal; downstream weighting treats them as neutral evidence.
pub trait PerturbImage: Plugin {
    /// Generate the mask stack for an image of the given size.
    fn masks(&self, size: ImageSize) -> Result<Array3<bool>, PerturbError>;

    /// Generate masks for `image` and apply each one.
    ///
    /// Returns the occluded images together with the mask stack, index
    /// aligned. Callers under memory pressure generate [`PerturbImage::masks`]
    /// once and apply [`occlude`] one mask at a time instead.
    fn augment(
        &self,
        image: &ArrayView3<'_, f32>,
        fill: f32,
    ) -> Result<(Vec<Array3<f32>>, Array3<bool>), PerturbError> {
        let (height, width, _channels) = image.dim();
        let masks = self.masks(ImageSize { width, height })?;

        let mut images = Vec::with_capacity(masks.dim().0);
        for mask in masks.axis_iter(Axis(0)) {
            images.push(occlude(image, &mask, fill)?);
        }
        Ok((images, masks))
    }
}
