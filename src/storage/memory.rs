use super::store::{Collection, Record, StoreError, Versioned};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct Records<T> {
    entries: Vec<Versioned<T>>,
    by_id: HashMap<String, usize>,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

/// In-memory collection with per-record versions. Clone-friendly via Arc.
///
/// Every write takes the collection's write lock, so a versioned update is
/// atomic with respect to other writers of the same record.
pub struct MemoryCollection<T> {
    records: Arc<RwLock<Records<T>>>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Records::default())),
        }
    }

    /// Build a collection from previously saved records, each at version 1.
    pub fn from_records(items: Vec<T>) -> Result<Self, StoreError> {
        let mut records = Records::default();
        for item in items {
            let id = item.id().to_string();
            if records.by_id.contains_key(&id) {
                return Err(StoreError::Duplicate {
                    collection: T::COLLECTION,
                    id,
                });
            }
            records.by_id.insert(id, records.entries.len());
            records.entries.push(Versioned {
                data: item,
                version: 1,
            });
        }

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Current record values in insertion order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.records
            .read()
            .await
            .entries
            .iter()
            .map(|v| v.data.clone())
            .collect()
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MemoryCollection<T> {
    async fn insert(&self, record: T) -> Result<Versioned<T>, StoreError> {
        let mut records = self.records.write().await;
        let id = record.id().to_string();

        if records.by_id.contains_key(&id) {
            return Err(StoreError::Duplicate {
                collection: T::COLLECTION,
                id,
            });
        }

        let versioned = Versioned {
            data: record,
            version: 1,
        };
        let position = records.entries.len();
        records.entries.push(versioned.clone());
        records.by_id.insert(id.clone(), position);

        debug!(collection = T::COLLECTION, %id, "Inserted record");
        Ok(versioned)
    }

    async fn find_one(&self, id: &str) -> Result<Option<Versioned<T>>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .by_id
            .get(id)
            .map(|&position| records.entries[position].clone()))
    }

    async fn find_many(
        &self,
        filter: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<Vec<Versioned<T>>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .entries
            .iter()
            .filter(|v| filter(&v.data))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: &str,
        expected_version: u64,
        patch: T::Patch,
    ) -> Result<Versioned<T>, StoreError> {
        let mut records = self.records.write().await;

        let position = *records.by_id.get(id).ok_or_else(|| StoreError::NotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        })?;
        let entry = &mut records.entries[position];

        if entry.version != expected_version {
            return Err(StoreError::VersionConflict {
                collection: T::COLLECTION,
                id: id.to_string(),
                expected: expected_version,
                actual: entry.version,
            });
        }

        entry.data.apply(&patch);
        entry.version += 1;

        debug!(collection = T::COLLECTION, %id, version = entry.version, "Updated record");
        Ok(entry.clone())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().await.entries.len())
    }
}
