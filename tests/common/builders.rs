//! Test builders: ergonomic constructors for file and document stores.
//!
//! These builders are designed for readability in test setup, not for
//! production use. They panic on invalid input rather than returning `Result`.

use sevlog::{
    DocumentBackend, DocumentLogStore, FileBackend, FileLayout, FileLogStore, MemoryDatabase,
    Severity, SeverityTable, StoreConfig,
};
use std::path::Path;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// FileStoreBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`FileLogStore`] fixtures.
///
/// # Example
///
/// ```rust
/// let store = FileStoreBuilder::new()
///     .threshold(Severity::Info)
///     .max_size(1)
///     .files_amount(3)
///     .split(true)
///     .build(dir.path());
/// ```
pub struct FileStoreBuilder {
    config: StoreConfig,
    extension: String,
}

impl FileStoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::new(Severity::Debug)
                .with_max_size(1024)
                .with_files_amount(3),
            extension: "txt".to_string(),
        }
    }

    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Size limit in bytes. `1` rotates before every write after the first.
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.config.max_size = bytes;
        self
    }

    pub fn files_amount(mut self, files_amount: usize) -> Self {
        self.config.files_amount = files_amount;
        self
    }

    pub fn split(mut self, split: bool) -> Self {
        self.config.split = split;
        self
    }

    pub fn extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    pub fn build(self, dir: &Path) -> FileLogStore {
        self.build_with(sevlog::FsBackend, dir)
    }

    pub fn build_with<B: FileBackend>(self, backend: B, dir: &Path) -> FileLogStore<B> {
        FileLogStore::with_backend(
            backend,
            FileLayout::new(dir, self.extension),
            self.config,
            Arc::new(SeverityTable::standard()),
        )
        .expect("test store directory must be creatable")
    }
}

// ---------------------------------------------------------------------------
// DocumentStoreBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`DocumentLogStore`] fixtures.
pub struct DocumentStoreBuilder {
    config: StoreConfig,
}

impl DocumentStoreBuilder {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::new(Severity::Debug)
                .with_max_size(u64::MAX)
                .with_files_amount(10),
        }
    }

    pub fn threshold(mut self, threshold: Severity) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Aggregate collection size ceiling in bytes.
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.config.max_size = bytes;
        self
    }

    /// Document count ceiling.
    pub fn files_amount(mut self, files_amount: usize) -> Self {
        self.config.files_amount = files_amount;
        self
    }

    pub fn split(mut self, split: bool) -> Self {
        self.config.split = split;
        self
    }

    /// Build against a fresh in-memory database. The returned `Arc` is the
    /// same database the store writes to.
    pub fn build(self) -> (DocumentLogStore<Arc<MemoryDatabase>>, Arc<MemoryDatabase>) {
        let db = Arc::new(MemoryDatabase::new("logs"));
        (self.build_with(db.clone()), db)
    }

    pub fn build_with<B: DocumentBackend>(self, backend: B) -> DocumentLogStore<B> {
        DocumentLogStore::new(backend, self.config, Arc::new(SeverityTable::standard()))
    }
}
