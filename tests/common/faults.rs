//! Fault-injecting backends.
//!
//! [`FaultyFiles`] wraps [`FsBackend`] and [`FaultyDatabase`] wraps
//! [`MemoryDatabase`]. Each lets a test register faults for an operation on a
//! stream, optionally limited to a number of occurrences, so rotation retries
//! and split-stream isolation can be exercised without touching permissions.

use sevlog::{
    BackendError, DocumentBackend, DocumentId, FileBackend, FsBackend, LogDocument,
    MemoryDatabase,
};
use std::io;
use std::path::Path;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// File operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Size,
    Append,
    Rename,
    Remove,
    CreateDir,
}

struct FileFault {
    op: FileOp,
    stream: String,
    /// `None` fails forever.
    remaining: Option<usize>,
}

/// A [`FileBackend`] that fails selected operations.
///
/// A fault matches a path when one of its components equals the stream name
/// (the `ERROR/` directory of a split stream) or its file name starts with it
/// (`log.txt`, `log3.txt`).
pub struct FaultyFiles {
    inner: FsBackend,
    faults: Mutex<Vec<FileFault>>,
    hits: Mutex<Vec<FileOp>>,
}

impl FaultyFiles {
    pub fn new() -> Self {
        Self {
            inner: FsBackend,
            faults: Mutex::new(Vec::new()),
            hits: Mutex::new(Vec::new()),
        }
    }

    /// Fail `op` on `stream` every time.
    pub fn fail(&self, op: FileOp, stream: &str) {
        self.push(op, stream, None);
    }

    /// Fail `op` on `stream` for the next `times` matching calls only.
    pub fn fail_times(&self, op: FileOp, stream: &str, times: usize) {
        self.push(op, stream, Some(times));
    }

    /// Operations that were failed so far, in order.
    pub fn injected(&self) -> Vec<FileOp> {
        self.hits.lock().unwrap().clone()
    }

    fn push(&self, op: FileOp, stream: &str, remaining: Option<usize>) {
        self.faults.lock().unwrap().push(FileFault {
            op,
            stream: stream.to_string(),
            remaining,
        });
    }

    fn check(&self, op: FileOp, path: &Path) -> io::Result<()> {
        let mut faults = self.faults.lock().unwrap();
        for fault in faults.iter_mut() {
            if fault.op != op || fault.remaining == Some(0) || !matches_stream(path, &fault.stream) {
                continue;
            }
            if let Some(remaining) = fault.remaining.as_mut() {
                *remaining -= 1;
            }
            self.hits.lock().unwrap().push(op);
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("injected {op:?} fault on {}", path.display()),
            ));
        }
        Ok(())
    }
}

fn matches_stream(path: &Path, stream: &str) -> bool {
    let in_dir = path.components().any(|c| c.as_os_str() == stream);
    let named = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(stream));
    in_dir || named
}

impl FileBackend for FaultyFiles {
    fn size(&self, path: &Path) -> io::Result<Option<u64>> {
        self.check(FileOp::Size, path)?;
        self.inner.size(path)
    }

    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.check(FileOp::Append, path)?;
        self.inner.append(path, bytes)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.check(FileOp::Rename, from)?;
        self.inner.rename(from, to)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.check(FileOp::Remove, path)?;
        self.inner.remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(FileOp::CreateDir, path)?;
        self.inner.create_dir_all(path)
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Document operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocOp {
    Insert,
    FindOldest,
    Delete,
    Count,
    Size,
}

/// A [`DocumentBackend`] that fails selected operations on selected
/// collections. Everything else is served by the wrapped [`MemoryDatabase`].
pub struct FaultyDatabase {
    pub inner: MemoryDatabase,
    faults: Mutex<Vec<(DocOp, String)>>,
}

impl FaultyDatabase {
    pub fn new() -> Self {
        Self {
            inner: MemoryDatabase::new("logs"),
            faults: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, op: DocOp, collection: &str) {
        self.faults
            .lock()
            .unwrap()
            .push((op, collection.to_string()));
    }

    pub fn heal(&self) {
        self.faults.lock().unwrap().clear();
    }

    fn check(&self, op: DocOp, collection: &str) -> Result<(), BackendError> {
        let faults = self.faults.lock().unwrap();
        if faults.iter().any(|(o, c)| *o == op && c == collection) {
            return Err(BackendError::new(format!(
                "injected {op:?} fault on {collection}"
            )));
        }
        Ok(())
    }
}

impl DocumentBackend for FaultyDatabase {
    fn insert_one(
        &self,
        collection: &str,
        document: LogDocument,
    ) -> Result<DocumentId, BackendError> {
        self.check(DocOp::Insert, collection)?;
        self.inner.insert_one(collection, document)
    }

    fn find_oldest(&self, collection: &str) -> Result<Option<DocumentId>, BackendError> {
        self.check(DocOp::FindOldest, collection)?;
        self.inner.find_oldest(collection)
    }

    fn delete_one(&self, collection: &str, id: DocumentId) -> Result<bool, BackendError> {
        self.check(DocOp::Delete, collection)?;
        self.inner.delete_one(collection, id)
    }

    fn count_documents(&self, collection: &str) -> Result<u64, BackendError> {
        self.check(DocOp::Count, collection)?;
        self.inner.count_documents(collection)
    }

    fn collection_size(&self, collection: &str) -> Result<u64, BackendError> {
        self.check(DocOp::Size, collection)?;
        self.inner.collection_size(collection)
    }
}
