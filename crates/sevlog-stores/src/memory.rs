//! In-memory [`DocumentBackend`].
//!
//! One `MemoryDatabase` plays the role of one database: a set of named
//! collections created on first insert. A document's size is the length of
//! its JSON encoding, and a collection's size is the sum over its documents.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use sevlog_core::{BackendError, DocumentBackend, DocumentId, LogDocument};

#[derive(Debug)]
struct StoredDocument {
    id: DocumentId,
    document: LogDocument,
    size: u64,
}

#[derive(Debug, Default)]
struct Collections {
    next_id: DocumentId,
    /// Documents in insertion order.
    by_name: HashMap<String, Vec<StoredDocument>>,
}

/// A database of log collections held in memory.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    name: String,
    inner: Mutex<Collections>,
}

impl MemoryDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Mutex::new(Collections::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Documents of `collection` in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<LogDocument> {
        self.lock()
            .by_name
            .get(collection)
            .map(|docs| docs.iter().map(|d| d.document.clone()).collect())
            .unwrap_or_default()
    }

    /// Names of collections that have received at least one insert, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}

impl DocumentBackend for MemoryDatabase {
    fn insert_one(
        &self,
        collection: &str,
        document: LogDocument,
    ) -> Result<DocumentId, BackendError> {
        let size = serde_json::to_vec(&document)
            .map_err(|err| BackendError::new(err.to_string()))?
            .len() as u64;

        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .by_name
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, document, size });
        Ok(id)
    }

    fn find_oldest(&self, collection: &str) -> Result<Option<DocumentId>, BackendError> {
        let inner = self.lock();
        Ok(inner.by_name.get(collection).and_then(|docs| {
            docs.iter()
                .enumerate()
                .min_by_key(|(position, stored)| (stored.document.timestamp, *position))
                .map(|(_, stored)| stored.id)
        }))
    }

    fn delete_one(&self, collection: &str, id: DocumentId) -> Result<bool, BackendError> {
        let mut inner = self.lock();
        let Some(docs) = inner.by_name.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter().position(|stored| stored.id == id) {
            Some(position) => {
                docs.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn count_documents(&self, collection: &str) -> Result<u64, BackendError> {
        Ok(self
            .lock()
            .by_name
            .get(collection)
            .map_or(0, |docs| docs.len() as u64))
    }

    fn collection_size(&self, collection: &str) -> Result<u64, BackendError> {
        Ok(self
            .lock()
            .by_name
            .get(collection)
            .map_or(0, |docs| docs.iter().map(|d| d.size).sum()))
    }
}
