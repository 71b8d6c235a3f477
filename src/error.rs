//! Configuration error types.
//!
//! The simulation itself never fails: rejected actions are reported as `bool`.
//! Only loading and validating tuning data can go wrong.

use std::fmt;

/// Errors raised while loading or validating a [`crate::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// The JSON document was malformed or had wrongly typed fields.
    Parse(serde_json::Error),

    /// A value parsed fine but is outside its usable range.
    Invalid {
        /// Dotted field name, e.g. `player.max_breath`.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not read config '{}': {}", path, source)
            }
            ConfigError::Parse(err) => write!(f, "malformed config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
