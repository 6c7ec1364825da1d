//! Error types for export operations.
//!
//! Every failure of an export call maps onto one of three kinds. Loader and
//! configuration layers report plain `String` messages instead.

use thiserror::Error;

/// Failure of a single export invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No records were supplied
    #[error("No data to export")]
    EmptyInput,

    /// Building or writing the artifact failed
    #[error("{message}")]
    SerializationFailure {
        /// Underlying error message
        message: String,
    },

    /// The delivery sink cannot save files on this host
    #[error("Host does not support file delivery: {reason}")]
    HostUnsupported {
        /// Why delivery is impossible
        reason: String,
    },
}

impl ExportError {
    /// Create a serialization failure from any displayable error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationFailure { message: message.into() }
    }

    /// Create a host-unsupported failure
    pub fn host_unsupported(reason: impl Into<String>) -> Self {
        Self::HostUnsupported { reason: reason.into() }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::serialization(e.to_string())
    }
}
