use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use saliency_plugin::{config, Config, Plugin, PluginError};

use crate::perturb::{positive_dimension, ImageSize, PerturbError, PerturbImage};

/// RISE-style random occlusion grid.
///
/// Each mask starts as a coarse boolean grid where every cell is kept with
/// probability `p_keep`, then gets upsampled to the image resolution with a
/// per-mask random crop shift so cell boundaries do not align across masks.
///
/// A fixed `seed` makes the whole stack reproducible; `None` draws a fresh
/// seed per call.
#[derive(Debug, Clone, Copy)]
pub struct RandomGrid {
    num_masks: usize,
    cells: ImageSize,
    p_keep: f64,
    seed: Option<u64>,
}

impl RandomGrid {
    /// Registry name of this plugin.
    pub const NAME: &'static str = "random-grid";

    /// Create a random grid strategy.
    ///
    /// `cells` is the coarse grid resolution and must be non-zero in both
    /// dimensions; `p_keep` is the per-cell keep probability in `[0, 1]`.
    pub fn new(
        num_masks: usize,
        cells: ImageSize,
        p_keep: f64,
        seed: Option<u64>,
    ) -> Result<Self, PerturbError> {
        if cells.width == 0 || cells.height == 0 {
            return Err(PerturbError::InvalidParameter {
                name: "cells",
                reason: "grid dimensions must be non-zero",
            });
        }
        if !(0.0..=1.0).contains(&p_keep) {
            return Err(PerturbError::InvalidParameter {
                name: "p_keep",
                reason: "keep probability must lie in [0, 1]",
            });
        }
        Ok(Self {
            num_masks,
            cells,
            p_keep,
            seed,
        })
    }

    /// Number of masks generated per call.
    pub fn num_masks(&self) -> usize {
        self.num_masks
    }

    /// Coarse grid resolution.
    pub fn cells(&self) -> ImageSize {
        self.cells
    }

    /// Per-cell keep probability.
    pub fn p_keep(&self) -> f64 {
        self.p_keep
    }

    /// Fixed seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RandomGrid {
    fn default() -> Self {
        Self {
            num_masks: 256,
            cells: ImageSize {
                width: 8,
                height: 8,
            },
            p_keep: 0.5,
            seed: None,
        }
    }
}

impl Plugin for RandomGrid {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config(&self) -> Config {
        let mut c = Config::new();
        c.insert("num_masks".to_string(), self.num_masks.into());
        c.insert("cells_width".to_string(), self.cells.width.into());
        c.insert("cells_height".to_string(), self.cells.height.into());
        c.insert("p_keep".to_string(), self.p_keep.into());
        if let Some(seed) = self.seed {
            c.insert("seed".to_string(), seed.into());
        }
        c
    }

    fn set_config(&mut self, config: &Config) -> Result<(), PluginError> {
        config::unknown_keys(
            config,
            self.name(),
            &["num_masks", "cells_width", "cells_height", "p_keep", "seed"],
        )?;
        if let Some(value) = config::integer(config, self.name(), "num_masks")? {
            self.num_masks = value as usize;
        }
        if let Some(value) = positive_dimension(config, self.name(), "cells_width")? {
            self.cells.width = value;
        }
        if let Some(value) = positive_dimension(config, self.name(), "cells_height")? {
            self.cells.height = value;
        }
        if let Some(value) = config::number(config, self.name(), "p_keep")? {
            if !(0.0..=1.0).contains(&value) {
                return Err(PluginError::InvalidOption {
                    plugin: self.name(),
                    key: "p_keep",
                    expected: "number in [0, 1]",
                });
            }
            self.p_keep = value;
        }
        if let Some(value) = config::integer(config, self.name(), "seed")? {
            self.seed = Some(value);
        }
        Ok(())
    }
}

impl PerturbImage for RandomGrid {
    fn masks(&self, size: ImageSize) -> Result<Array3<bool>, PerturbError> {
        if size.width == 0 || size.height == 0 {
            return Err(PerturbError::ZeroImageSize {
                width: size.width,
                height: size.height,
            });
        }

        let cell_height = size.height.div_ceil(self.cells.height);
        let cell_width = size.width.div_ceil(self.cells.width);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };

        // one extra cell per axis leaves room for the crop shift
        let mut grid = Array2::from_elem((self.cells.height + 1, self.cells.width + 1), false);
        let mut masks = Array3::from_elem((self.num_masks, size.height, size.width), false);

        for i in 0..self.num_masks {
            for cell in grid.iter_mut() {
                *cell = rng.random_bool(self.p_keep);
            }
            let offset_y = rng.random_range(0..cell_height);
            let offset_x = rng.random_range(0..cell_width);

            for y in 0..size.height {
                let gy = (y + offset_y) / cell_height;
                for x in 0..size.width {
                    let gx = (x + offset_x) / cell_width;
                    masks[[i, y, x]] = grid[[gy, gx]];
                }
            }
        }

        log::debug!(
            "random grid produced {} masks for {} with {} cells",
            self.num_masks,
            size,
            self.cells
        );
        Ok(masks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ImageSize = ImageSize {
        width: 12,
        height: 10,
    };

    fn grid(p_keep: f64, seed: u64) -> Result<RandomGrid, PerturbError> {
        RandomGrid::new(
            16,
            ImageSize {
                width: 4,
                height: 4,
            },
            p_keep,
            Some(seed),
        )
    }

    #[test]
    fn fixed_seed_is_reproducible() -> Result<(), PerturbError> {
        let perturber = grid(0.5, 7)?;
        let first = perturber.masks(SIZE)?;
        let second = perturber.masks(SIZE)?;
        assert_eq!(first, second);
        assert_eq!(first.dim(), (16, 10, 12));
        Ok(())
    }

    #[test]
    fn different_seeds_differ() -> Result<(), PerturbError> {
        let first = grid(0.5, 1)?.masks(SIZE)?;
        let second = grid(0.5, 2)?.masks(SIZE)?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn extreme_probabilities_saturate() -> Result<(), PerturbError> {
        let all_kept = grid(1.0, 3)?.masks(SIZE)?;
        assert!(all_kept.iter().all(|&keep| keep));

        let all_occluded = grid(0.0, 3)?.masks(SIZE)?;
        assert!(all_occluded.iter().all(|&keep| !keep));
        Ok(())
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            RandomGrid::new(
                8,
                ImageSize {
                    width: 0,
                    height: 4
                },
                0.5,
                None
            ),
            Err(PerturbError::InvalidParameter { name: "cells", .. })
        ));
        assert!(matches!(
            RandomGrid::new(
                8,
                ImageSize {
                    width: 4,
                    height: 4
                },
                1.5,
                None
            ),
            Err(PerturbError::InvalidParameter { name: "p_keep", .. })
        ));
    }

    #[test]
    fn config_round_trip_keeps_seed() -> Result<(), PluginError> {
        let mut perturber = RandomGrid::default();
        let mut config = Config::new();
        config.insert("num_masks".to_string(), 32.into());
        config.insert("p_keep".to_string(), 0.25.into());
        config.insert("seed".to_string(), 99.into());
        perturber.set_config(&config)?;

        assert_eq!(perturber.num_masks(), 32);
        assert_eq!(perturber.p_keep(), 0.25);
        assert_eq!(perturber.seed(), Some(99));
        assert_eq!(perturber.config()["seed"], 99);
        Ok(())
    }

    #[test]
    fn config_rejects_out_of_range_probability() {
        let mut perturber = RandomGrid::default();
        let mut config = Config::new();
        config.insert("p_keep".to_string(), (-0.1).into());
        assert!(matches!(
            perturber.set_config(&config),
            Err(PluginError::InvalidOption { key: "p_keep", .. })
        ));
    }
}
