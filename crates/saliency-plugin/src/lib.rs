#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Saliency Plugin
//!
//! Every swappable component of a saliency pipeline (mask providers, map
//! generators, scoring oracles) implements [`Plugin`]: a stable name plus a
//! serializable key-value configuration. [`Registry`] maps those names to
//! factories so a pipeline can be rebuilt from a serialized
//! [`PluginDescription`], which is how experiments stay reproducible.
//!
//! ## Example
//!
//! ```rust
//! use saliency_plugin::{config, Config, Plugin, PluginDescription, PluginError, Registry};
//!
//! #[derive(Default)]
//! struct Threshold {
//!     level: f64,
//! }
//!
//! impl Plugin for Threshold {
//!     fn name(&self) -> &'static str {
//!         "threshold"
//!     }
//!
//!     fn config(&self) -> Config {
//!         let mut c = Config::new();
//!         c.insert("level".to_string(), self.level.into());
//!         c
//!     }
//!
//!     fn set_config(&mut self, config: &Config) -> Result<(), PluginError> {
//!         config::unknown_keys(config, self.name(), &["level"])?;
//!         if let Some(level) = config::number(config, self.name(), "level")? {
//!             self.level = level;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut registry: Registry<dyn Plugin> = Registry::new();
//! registry.register("threshold", |config| {
//!     let mut plugin = Threshold::default();
//!     plugin.set_config(config)?;
//!     Ok(Box::new(plugin))
//! })?;
//!
//! let description = PluginDescription::named("threshold").with_option("level", 0.5);
//! let plugin = registry.create(&description)?;
//! assert_eq!(plugin.config()["level"], 0.5);
//! # Ok::<(), PluginError>(())
//! ```

/// Typed access helpers for plugin configuration values.
pub mod config;

/// Name-to-factory registries for plugin capabilities.
pub mod registry;

mod error;
mod plugin;

pub use config::{Config, PluginDescription, Value};
pub use error::PluginError;
pub use plugin::Plugin;
pub use registry::{PluginFactory, Registry};
