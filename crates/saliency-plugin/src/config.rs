use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
pub use serde_json::Value;

use crate::error::PluginError;
use crate::plugin::Plugin;

/// Key-value configuration of one plugin instance.
///
/// A `BTreeMap` keeps serialized configurations in a stable key order.
pub type Config = BTreeMap<String, Value>;

/// Serializable description of a configured plugin.
///
/// `name` selects the factory in a [`crate::Registry`]; `config` restores the
/// instance parameters. Round-tripping a description through JSON and
/// [`crate::Registry::create`] yields an identically configured instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescription {
    /// Registry name of the plugin.
    pub name: String,
    /// Configuration to apply after construction.
    #[serde(default, skip_serializing_if = "Config::is_empty")]
    pub config: Config,
}

impl PluginDescription {
    /// Description of a plugin with its default configuration.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Config::new(),
        }
    }

    /// Describe a live plugin instance.
    pub fn of(plugin: &dyn Plugin) -> Self {
        Self {
            name: plugin.name().to_string(),
            config: plugin.config(),
        }
    }

    /// Add one configuration option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }
}

/// Read an optional numeric option.
///
/// Missing keys yield `Ok(None)`; present keys with a non-numeric value are
/// rejected.
pub fn number(
    config: &Config,
    plugin: &'static str,
    key: &'static str,
) -> Result<Option<f64>, PluginError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(PluginError::InvalidOption {
                plugin,
                key,
                expected: "number",
            }),
    }
}

/// Read an optional non-negative integer option.
pub fn integer(
    config: &Config,
    plugin: &'static str,
    key: &'static str,
) -> Result<Option<u64>, PluginError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or(PluginError::InvalidOption {
                plugin,
                key,
                expected: "non-negative integer",
            }),
    }
}

/// Reject configuration keys outside the plugin's known set.
pub fn unknown_keys(
    config: &Config,
    plugin: &'static str,
    known: &[&str],
) -> Result<(), PluginError> {
    for key in config.keys() {
        if !known.contains(&key.as_str()) {
            return Err(PluginError::UnknownOption {
                plugin,
                key: key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_reads_and_rejects() -> Result<(), PluginError> {
        let mut config = Config::new();
        config.insert("p".to_string(), 0.5.into());
        config.insert("label".to_string(), "high".into());

        assert_eq!(number(&config, "t", "p")?, Some(0.5));
        assert_eq!(number(&config, "t", "missing")?, None);
        assert!(matches!(
            number(&config, "t", "label"),
            Err(PluginError::InvalidOption { key: "label", .. })
        ));
        Ok(())
    }

    #[test]
    fn integer_rejects_negative_and_fractional() -> Result<(), PluginError> {
        let mut config = Config::new();
        config.insert("n".to_string(), 32.into());
        config.insert("neg".to_string(), (-3).into());
        config.insert("frac".to_string(), 1.5.into());

        assert_eq!(integer(&config, "t", "n")?, Some(32));
        assert!(integer(&config, "t", "neg").is_err());
        assert!(integer(&config, "t", "frac").is_err());
        Ok(())
    }

    #[test]
    fn unknown_keys_flags_stray_entries() {
        let mut config = Config::new();
        config.insert("window".to_string(), 8.into());
        config.insert("stride".to_string(), 4.into());

        assert!(unknown_keys(&config, "t", &["window", "stride"]).is_ok());
        let result = unknown_keys(&config, "t", &["window"]);
        assert!(matches!(
            result,
            Err(PluginError::UnknownOption { key, .. }) if key == "stride"
        ));
    }

    #[test]
    fn description_round_trips_through_json() -> Result<(), serde_json::Error> {
        let description = PluginDescription::named("random-grid")
            .with_option("num_masks", 128)
            .with_option("p_keep", 0.5);

        let json = serde_json::to_string(&description)?;
        let restored: PluginDescription = serde_json::from_str(&json)?;
        assert_eq!(description, restored);

        let bare: PluginDescription = serde_json::from_str(r#"{"name":"scalar-occlusion"}"#)?;
        assert_eq!(bare, PluginDescription::named("scalar-occlusion"));
        Ok(())
    }
}
