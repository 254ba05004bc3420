use ndarray::{s, Array3};

use saliency_plugin::{config, Config, Plugin, PluginError};

use crate::perturb::{positive_dimension, ImageSize, PerturbError, PerturbImage};

/// Deterministic occlusion-window scan.
///
/// Slides a `window` of occluded pixels over the image in `stride` steps,
/// one mask per window position. Windows are clipped at the image edges, so
/// every position contributes a mask even when the window overhangs.
///
/// With `stride <= window` every pixel is occluded by at least one mask,
/// which keeps the downstream per-pixel weighting free of zero-evidence
/// fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct SlidingWindow {
    window: ImageSize,
    stride: ImageSize,
}

impl SlidingWindow {
    /// Registry name of this plugin.
    pub const NAME: &'static str = "sliding-window";

    /// Create a scan with the given occlusion window and stride.
    ///
    /// Both sizes must be non-zero in each dimension.
    pub fn new(window: ImageSize, stride: ImageSize) -> Result<Self, PerturbError> {
        if window.width == 0 || window.height == 0 {
            return Err(PerturbError::InvalidParameter {
                name: "window",
                reason: "window dimensions must be non-zero",
            });
        }
        if stride.width == 0 || stride.height == 0 {
            return Err(PerturbError::InvalidParameter {
                name: "stride",
                reason: "stride dimensions must be non-zero",
            });
        }
        Ok(Self { window, stride })
    }

    /// The occlusion window size.
    pub fn window(&self) -> ImageSize {
        self.window
    }

    /// The scan stride.
    pub fn stride(&self) -> ImageSize {
        self.stride
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self {
            window: ImageSize {
                width: 16,
                height: 16,
            },
            stride: ImageSize {
                width: 8,
                height: 8,
            },
        }
    }
}

impl Plugin for SlidingWindow {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config(&self) -> Config {
        let mut c = Config::new();
        c.insert("window_width".to_string(), self.window.width.into());
        c.insert("window_height".to_string(), self.window.height.into());
        c.insert("stride_width".to_string(), self.stride.width.into());
        c.insert("stride_height".to_string(), self.stride.height.into());
        c
    }

    fn set_config(&mut self, config: &Config) -> Result<(), PluginError> {
        config::unknown_keys(
            config,
            self.name(),
            &[
                "window_width",
                "window_height",
                "stride_width",
                "stride_height",
            ],
        )?;
        if let Some(value) = positive_dimension(config, self.name(), "window_width")? {
            self.window.width = value;
        }
        if let Some(value) = positive_dimension(config, self.name(), "window_height")? {
            self.window.height = value;
        }
        if let Some(value) = positive_dimension(config, self.name(), "stride_width")? {
            self.stride.width = value;
        }
        if let Some(value) = positive_dimension(config, self.name(), "stride_height")? {
            self.stride.height = value;
        }
        Ok(())
    }
}

impl PerturbImage for SlidingWindow {
    fn masks(&self, size: ImageSize) -> Result<Array3<bool>, PerturbError> {
        if size.width == 0 || size.height == 0 {
            return Err(PerturbError::ZeroImageSize {
                width: size.width,
                height: size.height,
            });
        }

        let rows = size.height.div_ceil(self.stride.height);
        let cols = size.width.div_ceil(self.stride.width);
        let count = rows * cols;

        let mut masks = Array3::from_elem((count, size.height, size.width), true);
        let mut index = 0;
        for y0 in (0..size.height).step_by(self.stride.height) {
            for x0 in (0..size.width).step_by(self.stride.width) {
                let y1 = (y0 + self.window.height).min(size.height);
                let x1 = (x0 + self.window.width).min(size.width);
                masks.slice_mut(s![index, y0..y1, x0..x1]).fill(false);
                index += 1;
            }
        }

        log::debug!("sliding window produced {} masks for {}", count, size);
        Ok(masks)
    }
}
