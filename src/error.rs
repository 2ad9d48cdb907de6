//! Error taxonomy for the controller
//!
//! Every variant is terminal: the process reports it and exits with code 1.
//! Malformed event batches are not errors and never surface here.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("couldn't open device directory {dir:?}: {source}")]
    DirectoryUnavailable {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't find G600 input device in {dir:?} (prefix {prefix:?}, suffix {suffix:?})")]
    DeviceNotFound {
        dir: PathBuf,
        prefix: String,
        suffix: String,
    },

    #[error("couldn't open {path:?} for reading: {source}")]
    DeviceOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't grab {path:?} exclusively: {source}")]
    DeviceGrabFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from {path:?}: {source}")]
    StreamReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("built-in key map is invalid: {0}")]
    KeymapInvalid(String),
}

impl ControllerError {
    /// Hints printed after the error, most specific first.
    pub fn suggestions(&self) -> Vec<String> {
        let mut hints = Vec::new();
        match self {
            Self::DirectoryUnavailable { dir, .. } => {
                hints.push(format!(
                    "Maybe the expected directory ({}) is wrong. Check whether this directory exists.",
                    dir.display()
                ));
            }
            Self::DeviceNotFound { dir, prefix, .. } => {
                hints.push(format!(
                    "Maybe the expected device prefix ({}) is wrong. Check whether a device with this prefix exists in {}.",
                    prefix,
                    dir.display()
                ));
            }
            Self::StreamReadFailed { .. } | Self::KeymapInvalid(_) => return hints,
            Self::DeviceOpenFailed { .. } | Self::DeviceGrabFailed { .. } => {}
        }
        hints.push(
            "Maybe a permission is missing. Try running this program with sudo.".to_string(),
        );
        hints
    }
}

pub type Result<T> = std::result::Result<T, ControllerError>;
