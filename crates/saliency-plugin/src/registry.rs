use std::collections::BTreeMap;

use crate::config::{Config, PluginDescription};
use crate::error::PluginError;

/// Factory building a boxed plugin from a configuration.
///
/// Plain function pointers capture no state, so a registry is `Send + Sync`
/// and can be shared across threads as-is.
pub type PluginFactory<C> = fn(&Config) -> Result<Box<C>, PluginError>;

/// Name-to-factory map for one plugin capability.
///
/// `C` is the capability trait object, for example `Registry<dyn Plugin>`.
/// Registries are explicit values; building and sharing them is the caller's
/// decision rather than a hidden global side effect.
pub struct Registry<C: ?Sized> {
    factories: BTreeMap<&'static str, PluginFactory<C>>,
}

impl<C: ?Sized> Registry<C> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register a factory under a unique name.
    pub fn register(
        &mut self,
        name: &'static str,
        factory: PluginFactory<C>,
    ) -> Result<(), PluginError> {
        if self.factories.contains_key(name) {
            return Err(PluginError::DuplicatePlugin(name));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Whether a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a configured instance from a description.
    pub fn create(&self, description: &PluginDescription) -> Result<Box<C>, PluginError> {
        match self.factories.get(description.name.as_str()) {
            Some(factory) => factory(&description.config),
            None => Err(PluginError::UnknownPlugin(description.name.clone())),
        }
    }

    /// Build an instance with its default configuration.
    pub fn create_default(&self, name: &str) -> Result<Box<C>, PluginError> {
        self.create(&PluginDescription::named(name))
    }
}

impl<C: ?Sized> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}
