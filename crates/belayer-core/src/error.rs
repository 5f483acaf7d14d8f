//! Error type shared by every belayer operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for belayer operations.
#[derive(Debug, Error)]
pub enum BelayerError {
    /// No configuration file has been written for this project yet.
    #[error("No configuration found at {}. Run `belayer` first to set up the configuration.", path.display())]
    ConfigurationMissing { path: PathBuf },

    /// The configuration file exists but could not be parsed.
    #[error("Invalid configuration file {}: {source}", path.display())]
    ConfigurationInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The install destination already exists.
    #[error("Component \"{component}\" already exists in {}", destination.display())]
    DestinationConflict {
        component: String,
        destination: PathBuf,
    },

    /// The component name is not a single plain path segment.
    #[error("Invalid component name '{name}': {reason}")]
    InvalidComponentName { name: String, reason: &'static str },

    /// A git step failed or produced an unexpected checkout.
    #[error("{step} failed: {message}")]
    FetchFailure { step: String, message: String },

    /// git is missing or too old for sparse checkout.
    #[error("{0}")]
    GitUnavailable(String),

    /// Underlying filesystem failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl BelayerError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn fetch(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailure {
            step: step.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = BelayerError> = std::result::Result<T, E>;
