use crate::config::Config;
use crate::error::PluginError;

/// A named, configurable pipeline component.
///
/// Implementations expose their tunable parameters as a [`Config`] so a
/// configured instance can be described, serialized and rebuilt elsewhere.
/// Configuration tunes parameters only; it never changes what a component
/// computes.
pub trait Plugin: Send + Sync {
    /// Stable name used for registry lookup and serialization.
    fn name(&self) -> &'static str;

    /// Snapshot of the current configuration.
    ///
    /// The default covers plugins without parameters.
    fn config(&self) -> Config {
        Config::new()
    }

    /// Apply a configuration, rejecting unknown keys and invalid values.
    ///
    /// On error the plugin keeps its previous state for every key reported
    /// invalid; callers treat a failed `set_config` as fatal for the instance.
    fn set_config(&mut self, config: &Config) -> Result<(), PluginError> {
        match config.keys().next() {
            None => Ok(()),
            Some(key) => Err(PluginError::UnknownOption {
                plugin: self.name(),
                key: key.clone(),
            }),
        }
    }
}
