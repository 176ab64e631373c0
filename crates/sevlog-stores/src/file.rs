//! Rotating file store.
//!
//! Layout under the store directory:
//!
//! ```text
//! dir/log.txt            active all-severity file
//! dir/log1.txt …         backlog, higher index = older
//! dir/ERROR/ERROR.txt    active ERROR file (split only)
//! dir/ERROR/ERROR1.txt … its backlog
//! ```
//!
//! Before every append the active file of the stream is checked against the
//! size limit and rotated if it is full. Only one writer per stream is
//! supported; concurrent writers must be serialized by the caller, for
//! example through [`StoreWriter`](crate::StoreWriter).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sevlog_core::{
    FileBackend, LogError, LogEvent, LogStore, RotationPlan, RotationPolicy, SeverityFilter,
    SeverityTable, StoreConfig, Stream,
};

use crate::fs::FsBackend;

/// Where each stream's units live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    dir: PathBuf,
    extension: String,
}

impl FileLayout {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory holding every unit of `stream`.
    pub fn stream_dir(&self, stream: Stream) -> PathBuf {
        match stream {
            Stream::All => self.dir.clone(),
            Stream::Severity(severity) => self.dir.join(severity.as_str()),
        }
    }

    /// Path of unit `index` of `stream`; index 0 is the active file.
    pub fn unit_path(&self, stream: Stream, index: usize) -> PathBuf {
        let name = stream.name();
        let file = if index == 0 {
            format!("{name}.{}", self.extension)
        } else {
            format!("{name}{index}.{}", self.extension)
        };
        self.stream_dir(stream).join(file)
    }

    pub fn active_path(&self, stream: Stream) -> PathBuf {
        self.unit_path(stream, 0)
    }
}

/// A [`LogStore`] writing lines to size-capped rotating files.
#[derive(Debug)]
pub struct FileLogStore<B = FsBackend> {
    backend: B,
    layout: FileLayout,
    policy: RotationPolicy,
    config: StoreConfig,
    severities: Arc<SeverityTable>,
}

impl FileLogStore<FsBackend> {
    /// Open a store on the local filesystem with `.txt` files and the
    /// standard severity names.
    pub fn open(dir: impl Into<PathBuf>, config: StoreConfig) -> Result<Self, LogError> {
        Self::with_backend(
            FsBackend,
            FileLayout::new(dir, "txt"),
            config,
            Arc::new(SeverityTable::standard()),
        )
    }
}

impl<B: FileBackend> FileLogStore<B> {
    /// Build a store and create its directory.
    pub fn with_backend(
        backend: B,
        layout: FileLayout,
        config: StoreConfig,
        severities: Arc<SeverityTable>,
    ) -> Result<Self, LogError> {
        backend
            .create_dir_all(layout.dir())
            .map_err(|err| LogError::Unavailable {
                target: layout.dir().display().to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            backend,
            layout,
            policy: RotationPolicy::new(config.max_size, config.files_amount),
            config,
            severities,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Path the next event of `stream` should be appended to, rotating the
    /// stream first if its active file is full.
    pub fn select_write_target(&self, stream: Stream) -> Result<PathBuf, LogError> {
        self.backend
            .create_dir_all(&self.layout.stream_dir(stream))
            .map_err(|err| LogError::rotation(stream.name(), err))?;

        let active = self.layout.active_path(stream);
        let size = self
            .backend
            .size(&active)
            .map_err(|err| LogError::rotation(stream.name(), err))?;

        if self.policy.needs_rotation(size) {
            self.rotate(stream)?;
        }
        Ok(active)
    }

    /// Number of contiguous backlog units of `stream`, counted from index 1.
    pub fn backlog_len(&self, stream: Stream) -> Result<usize, LogError> {
        let mut len = 0;
        while self
            .backend
            .size(&self.layout.unit_path(stream, len + 1))
            .map_err(|err| LogError::rotation(stream.name(), err))?
            .is_some()
        {
            len += 1;
        }
        Ok(len)
    }

    /// Demote the active unit of `stream` into the backlog.
    pub fn rotate(&self, stream: Stream) -> Result<RotationPlan, LogError> {
        let backlog = self.backlog_len(stream)?;
        let plan = self.policy.plan(backlog);

        for &index in &plan.evict {
            let path = self.layout.unit_path(stream, index);
            self.backend
                .remove(&path)
                .map_err(|err| LogError::rotation(stream.name(), format!("{}: {err}", path.display())))?;
        }
        for &(from, to) in &plan.shift {
            let from = self.layout.unit_path(stream, from);
            let to = self.layout.unit_path(stream, to);
            self.backend.rename(&from, &to).map_err(|err| {
                LogError::rotation(stream.name(), format!("{}: {err}", from.display()))
            })?;
        }

        // A unit left behind a gap now touches the backlog; drop it so the
        // next count stays within the ceiling.
        let stray = self.layout.unit_path(stream, plan.retained + 1);
        let stray_found = self
            .backend
            .size(&stray)
            .map_err(|err| LogError::rotation(stream.name(), err))?
            .is_some();
        if stray_found {
            self.backend.remove(&stray).map_err(|err| {
                LogError::rotation(stream.name(), format!("{}: {err}", stray.display()))
            })?;
        }

        tracing::debug!(
            stream = %stream,
            backlog,
            evicted = plan.evict.len(),
            shifted = plan.shift.len(),
            stray_found,
            "rotated log stream"
        );
        Ok(plan)
    }
}

impl<B: FileBackend> LogStore for FileLogStore<B> {
    fn severities(&self) -> &SeverityTable {
        &self.severities
    }

    fn filter(&self) -> SeverityFilter {
        self.config.filter()
    }

    fn splits(&self) -> bool {
        self.config.split
    }

    /// Append `event` to the active file of `stream`.
    ///
    /// A failed rotation is retried once against a recomputed target before
    /// the error is returned.
    fn write(&self, stream: Stream, event: &LogEvent) -> Result<(), LogError> {
        let target = match self.select_write_target(stream) {
            Ok(target) => target,
            Err(_) => self
                .select_write_target(stream)
                .map_err(LogError::retried)?,
        };

        self.backend
            .append(&target, event.to_line().as_bytes())
            .map_err(|err| LogError::write(stream.name(), err))?;
        tracing::trace!(stream = %stream, path = %target.display(), "appended log line");
        Ok(())
    }

    fn enforce_capacity(&self, stream: Stream) -> Result<(), LogError> {
        self.select_write_target(stream).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
