//! Remembered config paths.
//!
//! The loaders record the last `.env` and TOML paths they resolved so that
//! the next run can omit them. Storage is behind [`PathStore`] so the loaders
//! can be exercised against [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

/// Database filename inside the config directory.
const DB_FILENAME: &str = "o2b.db";

/// Which remembered path to read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// Last used dotenv file.
    Env,
    /// Last used TOML config file.
    Config,
}

impl PathKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Config => "config",
        }
    }
}

/// Persistent store for remembered paths.
pub trait PathStore {
    /// Read a remembered path.
    fn get(&self, key: PathKey) -> Result<Option<PathBuf>, StoreError>;

    /// Remember a path, replacing any previous value.
    fn set(&self, key: PathKey, path: &Path) -> Result<(), StoreError>;

    /// Directory holding the default config file.
    fn config_dir(&self) -> &Path;
}

/// Path store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `SQLite` failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Creating the config directory failed.
    #[error("Cannot create config directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Opening the database file failed.
    #[error("Cannot open path store {}: {source}", path.display())]
    Open {
        /// Database file.
        path: PathBuf,
        /// Underlying error.
        source: rusqlite::Error,
    },
    /// The platform has no config directory (no home directory).
    #[error("cannot determine config directory")]
    NoConfigDir,
}

/// Platform config directory for o2b.
///
/// - Linux: `~/.config/o2b/`
/// - macOS: `~/Library/Application Support/o2b/`
/// - Windows: `%AppData%\o2b\config\`
pub fn default_config_dir() -> Result<PathBuf, StoreError> {
    directories::ProjectDirs::from("", "", "o2b")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(StoreError::NoConfigDir)
}

/// `SQLite`-backed store living in the config directory.
pub struct SqliteStore {
    conn: Connection,
    config_dir: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the store inside `config_dir`.
    pub fn open(config_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(config_dir).map_err(|source| StoreError::CreateDir {
            path: config_dir.to_path_buf(),
            source,
        })?;
        let db_path = config_dir.join(DB_FILENAME);
        debug!("Opening path store at {}", db_path.display());
        let conn = Connection::open(&db_path).map_err(|source| StoreError::Open {
            path: db_path.clone(),
            source,
        })?;
        Self::with_connection(conn, config_dir)
    }

    /// In-memory store rooted at `config_dir` (for tests).
    pub fn open_in_memory(config_dir: &Path) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, config_dir)
    }

    fn with_connection(conn: Connection, config_dir: &Path) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS paths (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn,
            config_dir: config_dir.to_path_buf(),
        })
    }
}

impl PathStore for SqliteStore {
    fn get(&self, key: PathKey) -> Result<Option<PathBuf>, StoreError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM paths WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(PathBuf::from))
    }

    fn set(&self, key: PathKey, path: &Path) -> Result<(), StoreError> {
        let value = path.to_string_lossy();
        self.conn.execute(
            "INSERT INTO paths (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key.as_str(), &*value),
        )?;
        Ok(())
    }

    fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    paths: RefCell<HashMap<PathKey, PathBuf>>,
    config_dir: PathBuf,
}

impl MemoryStore {
    /// Create an empty store rooted at `config_dir`.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            paths: RefCell::default(),
            config_dir: config_dir.into(),
        }
    }
}

impl PathStore for MemoryStore {
    fn get(&self, key: PathKey) -> Result<Option<PathBuf>, StoreError> {
        Ok(self.paths.borrow().get(&key).cloned())
    }

    fn set(&self, key: PathKey, path: &Path) -> Result<(), StoreError> {
        self.paths.borrow_mut().insert(key, path.to_path_buf());
        Ok(())
    }

    fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
