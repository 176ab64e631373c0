//! Capped-collection document store.
//!
//! Every write inserts one document, then checks the count ceiling and the
//! size ceiling of that collection independently. Each violated ceiling
//! deletes exactly one document, the oldest by `Timestamp` (earliest insert on
//! ties). The insert is never rolled back: when a deletion fails the event
//! stays stored and the failure is returned as an `EvictionFailure`.
//!
//! Enforcement is single-pass. If concurrent inserts keep a collection over a
//! ceiling, one deletion per write will not catch up; the next write evicts
//! again.

use std::sync::Arc;

use sevlog_core::{
    Ceiling, DocumentBackend, DocumentId, EvictionPolicy, LogDocument, LogError, LogEvent,
    LogStore, SeverityFilter, SeverityTable, StoreConfig, Stream,
};

/// A [`LogStore`] writing documents into capped collections.
#[derive(Debug)]
pub struct DocumentLogStore<B> {
    backend: B,
    policy: EvictionPolicy,
    config: StoreConfig,
    severities: Arc<SeverityTable>,
}

impl<B: DocumentBackend> DocumentLogStore<B> {
    /// `config.files_amount` is the document ceiling and `config.max_size` the
    /// size ceiling of every collection.
    pub fn new(backend: B, config: StoreConfig, severities: Arc<SeverityTable>) -> Self {
        Self {
            backend,
            policy: EvictionPolicy::new(config.files_amount as u64, config.max_size),
            config,
            severities,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Delete the oldest document if `collection` has more than the allowed
    /// number of documents. Returns the evicted id.
    pub fn enforce_count(&self, collection: &str) -> Result<Option<DocumentId>, LogError> {
        self.enforce(collection, Ceiling::Count)
    }

    /// Delete the oldest document if `collection` is larger than the allowed
    /// size. Returns the evicted id.
    pub fn enforce_size(&self, collection: &str) -> Result<Option<DocumentId>, LogError> {
        self.enforce(collection, Ceiling::Size)
    }

    fn enforce(&self, collection: &str, ceiling: Ceiling) -> Result<Option<DocumentId>, LogError> {
        let value = match ceiling {
            Ceiling::Count => self.backend.count_documents(collection),
            Ceiling::Size => self.backend.collection_size(collection),
        }
        .map_err(|err| LogError::eviction(collection, err))?;

        if !self.policy.exceeded(ceiling, value) {
            return Ok(None);
        }

        let Some(oldest) = self
            .backend
            .find_oldest(collection)
            .map_err(|err| LogError::eviction(collection, err))?
        else {
            return Ok(None);
        };
        self.backend
            .delete_one(collection, oldest)
            .map_err(|err| LogError::eviction(collection, err))?;

        tracing::debug!(collection, %ceiling, value, id = oldest, "evicted oldest document");
        Ok(Some(oldest))
    }
}

impl<B: DocumentBackend> LogStore for DocumentLogStore<B> {
    fn severities(&self) -> &SeverityTable {
        &self.severities
    }

    fn filter(&self) -> SeverityFilter {
        self.config.filter()
    }

    fn splits(&self) -> bool {
        self.config.split
    }

    fn write(&self, stream: Stream, event: &LogEvent) -> Result<(), LogError> {
        let collection = stream.name();
        let id = self
            .backend
            .insert_one(collection, LogDocument::from(event))
            .map_err(|err| LogError::write(collection, err))?;
        tracing::trace!(collection, id, "inserted log document");
        self.enforce_capacity(stream)
    }

    /// Check both ceilings; a failure of one does not skip the other.
    fn enforce_capacity(&self, stream: Stream) -> Result<(), LogError> {
        let collection = stream.name();
        let failures = [Ceiling::Count, Ceiling::Size]
            .into_iter()
            .filter_map(|ceiling| self.enforce(collection, ceiling).err())
            .collect();
        LogError::collect(failures)
    }
}
