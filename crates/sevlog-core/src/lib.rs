//! sevlog-core: severity-filtered logging with bounded storage.
//!
//! This crate holds everything that does not touch a real storage backend:
//! the severity table and filter, the rotation and eviction policies, the
//! [`LogStore`] interface and the capability traits the stores are written
//! against.
//!
//! # Write path
//!
//! ```text
//! log(message, level) ──► SeverityFilter ──► [severity stream] ──► all stream
//!                                                 │                    │
//!                                   rotation / eviction    rotation / eviction
//! ```

pub mod backend;
pub mod calls;
pub mod config;
pub mod error;
pub mod eviction;
pub mod rotation;
pub mod severity;
pub mod store;
pub mod types;

pub use backend::{DocumentBackend, DocumentId, FileBackend};
pub use error::{BackendError, ErrorKind, LogError};
pub use eviction::{Ceiling, EvictionPolicy};
pub use rotation::{RotationPlan, RotationPolicy};
pub use severity::{SeverityFilter, SeverityTable};
pub use store::{LogStore, Logged, StoreConfig};
pub use types::{LogDocument, LogEvent, Severity, Stream};
