//! Storage capabilities consumed by the stores.
//!
//! Stores only see these two traits. `sevlog-stores` ships a std-fs
//! [`FileBackend`] and an in-memory [`DocumentBackend`]; anything else that
//! offers the same operations can be plugged in.

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::error::BackendError;
use crate::types::LogDocument;

/// Path-level operations needed by a rotating file store.
pub trait FileBackend: Send + Sync {
    /// Size in bytes, or `None` if nothing exists at `path`.
    fn size(&self, path: &Path) -> io::Result<Option<u64>>;

    /// Append `bytes`, creating the file if needed.
    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Identifier assigned to a document on insert.
pub type DocumentId = u64;

/// Collection-level operations needed by a capped document store.
pub trait DocumentBackend: Send + Sync {
    fn insert_one(&self, collection: &str, document: LogDocument)
        -> Result<DocumentId, BackendError>;

    /// The document with the oldest `Timestamp`; ties go to the earliest insert.
    fn find_oldest(&self, collection: &str) -> Result<Option<DocumentId>, BackendError>;

    /// Returns whether a document was removed.
    fn delete_one(&self, collection: &str, id: DocumentId) -> Result<bool, BackendError>;

    fn count_documents(&self, collection: &str) -> Result<u64, BackendError>;

    /// Aggregate size of the collection's documents in bytes.
    fn collection_size(&self, collection: &str) -> Result<u64, BackendError>;
}

impl<B: FileBackend + ?Sized> FileBackend for Arc<B> {
    fn size(&self, path: &Path) -> io::Result<Option<u64>> {
        (**self).size(path)
    }

    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).append(path, bytes)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for Arc<B> {
    fn insert_one(
        &self,
        collection: &str,
        document: LogDocument,
    ) -> Result<DocumentId, BackendError> {
        (**self).insert_one(collection, document)
    }

    fn find_oldest(&self, collection: &str) -> Result<Option<DocumentId>, BackendError> {
        (**self).find_oldest(collection)
    }

    fn delete_one(&self, collection: &str, id: DocumentId) -> Result<bool, BackendError> {
        (**self).delete_one(collection, id)
    }

    fn count_documents(&self, collection: &str) -> Result<u64, BackendError> {
        (**self).count_documents(collection)
    }

    fn collection_size(&self, collection: &str) -> Result<u64, BackendError> {
        (**self).collection_size(collection)
    }
}
