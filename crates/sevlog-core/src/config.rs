//! Configuration types for sevlog.
//!
//! [`Config::load`] layers an optional user file (TOML or JSON, picked by
//! extension) and `SEVLOG__*` environment variables on top of the built-in
//! defaults. [`Config::defaults`] returns the defaults without touching the
//! filesystem (useful in tests).
//!
//! Configuration is kept out of the stores: they take an already validated
//! [`StoreConfig`], produced here by [`Config::file_store_config`] and
//! [`Config::document_store_config`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use ::config::FileFormat;

use crate::error::LogError;
use crate::severity::SeverityTable;
use crate::store::StoreConfig;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[store]
level     = "INFO"
split_log = false

[file]
dir              = "Logs"
extension        = "txt"
max_file_size_kb = 1000
files_amount     = 100

[document]
database               = "logs"
max_collection_size_kb = 1000
files_amount           = 10
"#;

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "SEVLOG_CONFIG";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration. Unknown sections are rejected like unknown keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub file: FileSection,
    #[serde(default)]
    pub document: DocumentSection,
}

/// `[store]` section: settings shared by both backends.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub split_log: bool,
}

fn default_level() -> String { "INFO".to_string() }

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            split_log: false,
        }
    }
}

/// `[file]` section: rotating file store.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSection {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_max_kb")]
    pub max_file_size_kb: u64,
    #[serde(default = "default_file_amount")]
    pub files_amount: usize,
}

fn default_dir() -> PathBuf { PathBuf::from("Logs") }
fn default_extension() -> String { "txt".to_string() }
fn default_max_kb() -> u64 { 1000 }
fn default_file_amount() -> usize { 100 }

impl Default for FileSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            max_file_size_kb: default_max_kb(),
            files_amount: default_file_amount(),
        }
    }
}

/// `[document]` section: capped collection store.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentSection {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_kb")]
    pub max_collection_size_kb: u64,
    #[serde(default = "default_document_amount")]
    pub files_amount: usize,
}

fn default_database() -> String { "logs".to_string() }
fn default_document_amount() -> usize { 10 }

impl Default for DocumentSection {
    fn default() -> Self {
        Self {
            database: default_database(),
            max_collection_size_kb: default_max_kb(),
            files_amount: default_document_amount(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path`, or from `$SEVLOG_CONFIG`, or from `./sevlog.toml` if
    /// present, layered on top of the built-in defaults and overridden by
    /// `SEVLOG__<SECTION>__<KEY>` environment variables.
    ///
    /// An explicitly named file must exist; the fallback `./sevlog.toml` may not.
    pub fn load(path: Option<&Path>) -> Result<Self, LogError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => (PathBuf::from(path), true),
                None => (PathBuf::from("sevlog.toml"), false),
            },
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix("SEVLOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse configuration text layered on the defaults.
    pub fn parse(text: &str, format: FileFormat) -> Result<Self, LogError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(text, format))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Validated parameters for a file store.
    pub fn file_store_config(&self, table: &SeverityTable) -> Result<StoreConfig, LogError> {
        Ok(StoreConfig::new(table.lookup(&self.store.level)?)
            .with_max_size_kb(self.file.max_file_size_kb)
            .with_files_amount(self.file.files_amount)
            .with_split(self.store.split_log))
    }

    /// Validated parameters for a document store.
    pub fn document_store_config(&self, table: &SeverityTable) -> Result<StoreConfig, LogError> {
        Ok(StoreConfig::new(table.lookup(&self.store.level)?)
            .with_max_size_kb(self.document.max_collection_size_kb)
            .with_files_amount(self.document.files_amount)
            .with_split(self.store.split_log))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
