//! sevlog-stores: storage backends for sevlog.
//!
//! Two interchangeable [`LogStore`](sevlog_core::LogStore) implementations:
//!
//! - [`FileLogStore`]: size-capped rotating text files with a bounded backlog.
//! - [`DocumentLogStore`]: count- and size-capped document collections.
//!
//! plus the capability implementations they are usually paired with
//! ([`FsBackend`], [`MemoryDatabase`]) and [`StoreWriter`], which serializes
//! async callers onto a single writer task.

pub mod document;
pub mod file;
pub mod fs;
pub mod memory;
pub mod writer;

pub use document::DocumentLogStore;
pub use file::{FileLayout, FileLogStore};
pub use fs::FsBackend;
pub use memory::MemoryDatabase;
pub use writer::{StoreWriter, WriterHandle};
