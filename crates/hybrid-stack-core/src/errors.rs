//! Unified error type for the hybrid stack
//!
//! The engine itself never fails: lookups that miss and unknown actions are
//! no-ops. Errors only surface at the edges, when decoding wire messages or
//! loading configuration.

use serde::{Deserialize, Serialize};

/// Result alias used across the crate
pub type StackResult<T> = Result<T, StackError>;

/// Errors raised while decoding inbound data or loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StackError {
    /// Action string not in the closed action set
    #[error("Unknown action type: {value}")]
    UnknownAction {
        /// Raw action label as received
        value: String,
    },

    /// Page type string not recognized
    #[error("Unknown page kind: {value}")]
    UnknownPageKind {
        /// Raw page type label as received
        value: String,
    },

    /// Structurally invalid message
    #[error("Invalid message: {message}")]
    InvalidMessage {
        /// What was wrong with the message
        message: String,
    },

    /// Configuration could not be parsed or holds an invalid value
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Filesystem access failed
    #[error("IO error: {message}")]
    Io {
        /// Error message from the underlying IO failure
        message: String,
    },
}

impl StackError {
    /// Create an invalid message error
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// True when the error came from an unrecognized protocol label.
    ///
    /// The two runtimes ship independently, so these count as protocol drift
    /// rather than corruption.
    pub fn is_protocol_drift(&self) -> bool {
        matches!(
            self,
            Self::UnknownAction { .. } | Self::UnknownPageKind { .. }
        )
    }
}

impl From<std::io::Error> for StackError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for StackError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_message(err.to_string())
    }
}

impl From<toml::de::Error> for StackError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
