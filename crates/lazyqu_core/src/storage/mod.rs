//! Durable blob storage used by the record store.
//!
//! # Responsibility
//! - Define the persistence collaborator contract (`load`/`save` by key).
//! - Provide a SQLite-backed implementation and an in-memory fake.
//!
//! # Invariants
//! - `save` replaces the whole value stored under a key.
//! - `load` of a never-written key returns `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::{MemoryBlobStorage, StorageFaults};
pub use sqlite::SqliteBlobStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading or writing the durable blob.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// The backend refused the operation (quota, disabled storage, ...).
    Unavailable(String),
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value blob persistence injected into `VideoStore`.
pub trait BlobStorage {
    /// Reads the blob stored under `key`.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the blob stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;
}
