//! Queue-fed writer task.
//!
//! Stores assume a single writer per stream. [`StoreWriter`] gives async
//! callers that guarantee: the store is moved onto one blocking tokio task and
//! every request goes through a bounded `mpsc` queue, so writes are applied
//! one at a time in arrival order. Each caller gets the store's own result
//! back over a oneshot channel.

use sevlog_core::{LogError, LogEvent, LogStore, Logged};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum Entry {
    Named { message: String, level: String },
    Event(LogEvent),
}

struct Request {
    entry: Entry,
    reply: oneshot::Sender<Result<Logged, LogError>>,
}

/// Cloneable sender side of a [`StoreWriter`].
#[derive(Debug, Clone)]
pub struct WriterHandle {
    tx: mpsc::Sender<Request>,
}

impl WriterHandle {
    /// Queue `message` at the level called `level`.
    pub async fn log(
        &self,
        message: impl Into<String>,
        level: impl Into<String>,
    ) -> Result<Logged, LogError> {
        self.send(Entry::Named {
            message: message.into(),
            level: level.into(),
        })
        .await
    }

    /// Queue a pre-built event.
    pub async fn log_event(&self, event: LogEvent) -> Result<Logged, LogError> {
        self.send(Entry::Event(event)).await
    }

    async fn send(&self, entry: Entry) -> Result<Logged, LogError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request { entry, reply })
            .await
            .map_err(|_| LogError::Closed)?;
        response.await.map_err(|_| LogError::Closed)?
    }
}

/// Owns a store on a dedicated blocking task.
#[derive(Debug)]
pub struct StoreWriter<S> {
    handle: WriterHandle,
    task: JoinHandle<S>,
}

impl<S: LogStore + 'static> StoreWriter<S> {
    /// Move `store` onto a blocking task fed by a queue of `queue_depth`
    /// pending requests. Must be called from within a tokio runtime.
    pub fn spawn(store: S, queue_depth: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Request>(queue_depth.max(1));
        let task = tokio::task::spawn_blocking(move || {
            while let Some(Request { entry, reply }) = rx.blocking_recv() {
                let result = match &entry {
                    Entry::Named { message, level } => store.log(message, level),
                    Entry::Event(event) => store.log_event(event),
                };
                // The caller may have stopped waiting; the write still happened.
                let _ = reply.send(result);
            }
            tracing::debug!("log writer queue closed");
            store
        });

        Self {
            handle: WriterHandle { tx },
            task,
        }
    }

    /// A sender that can be cloned into other tasks.
    pub fn handle(&self) -> WriterHandle {
        self.handle.clone()
    }

    pub async fn log(
        &self,
        message: impl Into<String>,
        level: impl Into<String>,
    ) -> Result<Logged, LogError> {
        self.handle.log(message, level).await
    }

    pub async fn log_event(&self, event: LogEvent) -> Result<Logged, LogError> {
        self.handle.log_event(event).await
    }

    /// Stop accepting requests, wait for queued ones and hand the store back.
    ///
    /// Outstanding [`WriterHandle`] clones keep the queue open; this returns
    /// once they are all dropped.
    pub async fn shutdown(self) -> Result<S, LogError> {
        drop(self.handle);
        self.task.await.map_err(|_| LogError::Closed)
    }
}
