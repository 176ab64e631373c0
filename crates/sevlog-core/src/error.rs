//! Error types for sevlog.
//!
//! Filter rejections are not errors. Everything else a store can run into is
//! a [`LogError`] returned to the caller; stores never log their own failures.

use thiserror::Error;

/// Coarse classification of a [`LogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidLevel,
    RotationFailure,
    EvictionFailure,
    WriteFailure,
    Unavailable,
    Config,
    Closed,
    /// More than one stream of a split write failed.
    Multiple,
}

/// Errors returned by stores and their policies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// A level name that is not in the severity table. `accepted` lists the
    /// names the table knows, aliases included.
    #[error("invalid level {name:?}, expected one of {}", .accepted.join(", "))]
    InvalidLevel { name: String, accepted: Vec<String> },

    /// Renaming, deleting or probing backlog files failed. `attempts` is 2
    /// when the write was retried against a recomputed target and failed again.
    #[error("rotation of stream {stream} failed after {attempts} attempt(s): {reason}")]
    RotationFailure {
        stream: String,
        attempts: u8,
        reason: String,
    },

    /// The event was inserted but deleting the oldest document failed.
    #[error("eviction from collection {collection} failed: {reason}")]
    EvictionFailure { collection: String, reason: String },

    /// Appending or inserting the event itself failed.
    #[error("write to stream {stream} failed: {reason}")]
    WriteFailure { stream: String, reason: String },

    /// The backend could not be prepared when the store was built.
    #[error("storage target {target} unavailable: {reason}")]
    Unavailable { target: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// The writer task has stopped.
    #[error("log writer closed")]
    Closed,

    /// Independent failures of several streams during one split write.
    #[error("{} streams failed: {}", .0.len(), join(.0))]
    Streams(Vec<LogError>),
}

fn join(errors: &[LogError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::InvalidLevel { .. } => ErrorKind::InvalidLevel,
            LogError::RotationFailure { .. } => ErrorKind::RotationFailure,
            LogError::EvictionFailure { .. } => ErrorKind::EvictionFailure,
            LogError::WriteFailure { .. } => ErrorKind::WriteFailure,
            LogError::Unavailable { .. } => ErrorKind::Unavailable,
            LogError::Config(_) => ErrorKind::Config,
            LogError::Closed => ErrorKind::Closed,
            LogError::Streams(_) => ErrorKind::Multiple,
        }
    }

    /// Create a new RotationFailure for a first attempt
    pub fn rotation(stream: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::RotationFailure {
            stream: stream.into(),
            attempts: 1,
            reason: reason.to_string(),
        }
    }

    /// Create a new EvictionFailure
    pub fn eviction(collection: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::EvictionFailure {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new WriteFailure
    pub fn write(stream: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            stream: stream.into(),
            reason: reason.to_string(),
        }
    }

    /// Mark a rotation failure as having been retried once.
    pub fn retried(self) -> Self {
        match self {
            LogError::RotationFailure { stream, reason, .. } => LogError::RotationFailure {
                stream,
                attempts: 2,
                reason,
            },
            other => other,
        }
    }

    /// Fold per-stream failures into one result: no failures is `Ok`, a
    /// single failure is returned as-is, several become [`LogError::Streams`].
    pub fn collect(mut failures: Vec<LogError>) -> Result<(), LogError> {
        match failures.len() {
            0 => Ok(()),
            1 => Err(failures.remove(0)),
            _ => Err(LogError::Streams(failures)),
        }
    }

    /// The individual failures carried by this error.
    pub fn failures(&self) -> Vec<&LogError> {
        match self {
            LogError::Streams(errors) => errors.iter().flat_map(LogError::failures).collect(),
            other => vec![other],
        }
    }
}

impl From<config::ConfigError> for LogError {
    fn from(err: config::ConfigError) -> Self {
        LogError::Config(err.to_string())
    }
}

/// Error reported by a document backend capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError(err.to_string())
    }
}
