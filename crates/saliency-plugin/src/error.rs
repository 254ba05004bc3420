use thiserror::Error;

/// Errors produced by the plugin machinery.
#[derive(Debug, Error)]
pub enum PluginError {
    /// No factory is registered under the requested name.
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// A factory is already registered under this name.
    #[error("plugin {0} is already registered")]
    DuplicatePlugin(&'static str),

    /// The configuration carries a key the plugin does not define.
    #[error("plugin {plugin} has no option named {key}")]
    UnknownOption {
        /// Name of the plugin that rejected the configuration.
        plugin: &'static str,
        /// The unrecognized key.
        key: String,
    },

    /// A configuration value has the wrong type or is out of range.
    #[error("invalid value for option {key} of plugin {plugin}: expected {expected}")]
    InvalidOption {
        /// Name of the plugin that rejected the configuration.
        plugin: &'static str,
        /// The offending key.
        key: &'static str,
        /// Description of the accepted values.
        expected: &'static str,
    },

    /// A process-wide plugin set has already been installed.
    #[error("a plugin set is already installed for this process")]
    AlreadyInstalled,
}
