use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A record kept in a [`Collection`].
///
/// Each record type names the patch it accepts, so that every field a
/// writer touches goes through one versioned update.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
    type Patch: Clone + Send + Sync;

    fn id(&self) -> &str;
    fn apply(&mut self, patch: &Self::Patch);
}

/// A record together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection} record {id} already exists")]
    Duplicate { collection: &'static str, id: String },

    #[error("{collection} record {id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        collection: &'static str,
        id: String,
        expected: u64,
        actual: u64,
    },
}

/// Key/filter store consumed by the rating core.
#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    /// Insert a new record at version 1. Fails if the id is taken.
    async fn insert(&self, record: T) -> Result<Versioned<T>, StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<Versioned<T>>, StoreError>;

    /// Records matching `filter`, in insertion order.
    async fn find_many(
        &self,
        filter: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<Vec<Versioned<T>>, StoreError>;

    /// Apply `patch` only if the stored record is still at `expected_version`.
    async fn update(
        &self,
        id: &str,
        expected_version: u64,
        patch: T::Patch,
    ) -> Result<Versioned<T>, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    async fn all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self
            .find_many(&|_: &T| true)
            .await?
            .into_iter()
            .map(|v| v.data)
            .collect())
    }
}
