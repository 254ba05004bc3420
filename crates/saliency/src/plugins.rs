use std::sync::OnceLock;

use saliency_blackbox::{Detector, ScalarScorer};
use saliency_occlusion::{
    DetectionOcclusionSaliency, DetectionSaliencyMapGenerator, ScalarOcclusionSaliency,
    ScalarSaliencyMapGenerator,
};
use saliency_perturb::{PerturbImage, RandomGrid, SlidingWindow};
use saliency_plugin::{Config, Plugin, PluginError, Registry};

static PLUGINS: OnceLock<Plugins> = OnceLock::new();

fn sliding_window(config: &Config) -> Result<Box<dyn PerturbImage>, PluginError> {
    let mut plugin = SlidingWindow::default();
    plugin.set_config(config)?;
    Ok(Box::new(plugin))
}

fn random_grid(config: &Config) -> Result<Box<dyn PerturbImage>, PluginError> {
    let mut plugin = RandomGrid::default();
    plugin.set_config(config)?;
    Ok(Box::new(plugin))
}

fn scalar_occlusion(config: &Config) -> Result<Box<dyn ScalarSaliencyMapGenerator>, PluginError> {
    let mut plugin = ScalarOcclusionSaliency::new();
    plugin.set_config(config)?;
    Ok(Box::new(plugin))
}

fn detection_occlusion(
    config: &Config,
) -> Result<Box<dyn DetectionSaliencyMapGenerator>, PluginError> {
    let mut plugin = DetectionOcclusionSaliency::new();
    plugin.set_config(config)?;
    Ok(Box::new(plugin))
}

/// The plugin registries of one saliency deployment.
///
/// Each capability has its own [`Registry`]; applications extend them with
/// their own strategies and oracles before use. An assembled set can be
/// passed around as a value or installed once per process with
/// [`Plugins::install`].
pub struct Plugins {
    /// Mask providers.
    pub perturbers: Registry<dyn PerturbImage>,
    /// Saliency map generators for scalar scores.
    pub scalar_generators: Registry<dyn ScalarSaliencyMapGenerator>,
    /// Saliency map generators for detections.
    pub detection_generators: Registry<dyn DetectionSaliencyMapGenerator>,
    /// Scalar scoring oracles.
    pub scorers: Registry<dyn ScalarScorer>,
    /// Detection oracles.
    pub detectors: Registry<dyn Detector>,
}

impl Plugins {
    /// Registries with nothing registered.
    pub fn empty() -> Self {
        Self {
            perturbers: Registry::new(),
            scalar_generators: Registry::new(),
            detection_generators: Registry::new(),
            scorers: Registry::new(),
            detectors: Registry::new(),
        }
    }

    /// Registries holding the built-in strategies and generators.
    ///
    /// Oracle registries start empty; models belong to the application.
    pub fn with_defaults() -> Result<Self, PluginError> {
        let mut plugins = Self::empty();
        plugins
            .perturbers
            .register(SlidingWindow::NAME, sliding_window)?;
        plugins.perturbers.register(RandomGrid::NAME, random_grid)?;
        plugins
            .scalar_generators
            .register(ScalarOcclusionSaliency::NAME, scalar_occlusion)?;
        plugins
            .detection_generators
            .register(DetectionOcclusionSaliency::NAME, detection_occlusion)?;
        Ok(plugins)
    }

    /// Install this set as the process-wide default.
    ///
    /// Installation is a deliberate, one-time startup step; a second call
    /// reports [`PluginError::AlreadyInstalled`] and leaves the first set in
    /// place.
    pub fn install(self) -> Result<(), PluginError> {
        PLUGINS.set(self).map_err(|_| PluginError::AlreadyInstalled)
    }

    /// The installed process-wide set, if any.
    pub fn global() -> Option<&'static Plugins> {
        PLUGINS.get()
    }
}

impl Default for Plugins {
    fn default() -> Self {
        Self::empty()
    }
}
