//! Persistence for post like counters.
//!
//! Every backend implements [`LikeStore::increment_likes`] as a single
//! store-level primitive, so concurrent increments of one post are never
//! lost and the handlers need no locking of their own.

pub mod memory;
pub mod sqlite;

use thiserror::Error;

use crate::config::{Config, DEFAULT_SQLITE_LABEL};
use crate::models::PostRecord;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unsupported store url: {0:?}")]
    Unsupported(String),

    #[error("Store credentials are missing")]
    MissingCredentials,

    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Query(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub trait LikeStore {
    /// Adds one to `likes_count` of the post and returns the updated rows.
    /// An unknown id yields an empty vector.
    fn increment_likes(&self, post_id: &str) -> Result<Vec<PostRecord>, StoreError>;

    fn get_post(&self, post_id: &str) -> Result<Option<PostRecord>, StoreError>;

    /// All posts, newest first.
    fn list_posts(&self) -> Result<Vec<PostRecord>, StoreError>;
}

impl<T: LikeStore + ?Sized> LikeStore for &T {
    fn increment_likes(&self, post_id: &str) -> Result<Vec<PostRecord>, StoreError> {
        (**self).increment_likes(post_id)
    }

    fn get_post(&self, post_id: &str) -> Result<Option<PostRecord>, StoreError> {
        (**self).get_post(post_id)
    }

    fn list_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        (**self).list_posts()
    }
}

pub type StoreHandle<'a> = Box<dyn LikeStore + 'a>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite(String),
}

impl Backend {
    pub fn parse(url: &str) -> Result<Self, StoreError> {
        let url = url.trim();
        if url == "memory://" || url == "memory:" {
            return Ok(Backend::Memory);
        }
        if let Some(label) = url.strip_prefix("sqlite://") {
            let label = if label.is_empty() { DEFAULT_SQLITE_LABEL } else { label };
            return Ok(Backend::Sqlite(label.to_string()));
        }
        Err(StoreError::Unsupported(url.to_string()))
    }
}

pub fn check_credentials(config: &Config) -> Result<(), StoreError> {
    if config.service_role_key.is_empty() {
        return Err(StoreError::MissingCredentials);
    }
    Ok(())
}

/// Opens the backend named by `config.store_url` with the configured
/// credential. Used once per request by the Spin component.
///
/// Component instances do not outlive a request, so a memory store opened
/// here would drop every like. Only the native server may use `memory://`.
pub fn open_store(config: &Config) -> Result<StoreHandle<'static>, StoreError> {
    check_credentials(config)?;

    match Backend::parse(&config.store_url)? {
        Backend::Memory => Err(StoreError::Unsupported(config.store_url.trim().to_string())),
        Backend::Sqlite(label) => Ok(Box::new(SqliteStore::open(&label)?)),
    }
}
