//! sevlog: severity-filtered logging with bounded storage.
//!
//! This crate re-exports the core types and both stores so integration tests
//! and the binary can import everything from one place, and holds the
//! plumbing the CLI needs on top of them.
//!
//! # Architecture
//!
//! ```text
//! caller ──► StoreWriter (queue) ──► LogStore ──► FileLogStore ──► FileBackend
//!                                        │
//!                                        └──────► DocumentLogStore ──► DocumentBackend
//! ```

pub mod ingest;

pub use sevlog_core::*;
pub use sevlog_stores::*;

use std::sync::Arc;

/// Open the file store described by `config`.
pub fn open_file_store(
    config: &config::Config,
    severities: Arc<SeverityTable>,
) -> Result<FileLogStore, LogError> {
    let store_config = config.file_store_config(&severities)?;
    FileLogStore::with_backend(
        FsBackend,
        FileLayout::new(config.file.dir.clone(), config.file.extension.clone()),
        store_config,
        severities,
    )
}

/// Open an in-memory document store described by `config`.
pub fn open_memory_store(
    config: &config::Config,
    severities: Arc<SeverityTable>,
) -> Result<DocumentLogStore<Arc<MemoryDatabase>>, LogError> {
    let store_config = config.document_store_config(&severities)?;
    Ok(DocumentLogStore::new(
        Arc::new(MemoryDatabase::new(config.document.database.clone())),
        store_config,
        severities,
    ))
}
