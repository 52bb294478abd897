//! Record persistence: the versioned collection interface, its in-memory
//! backend, and catalog snapshots on disk.

pub mod memory;
pub mod snapshot;
pub mod store;

pub use memory::MemoryCollection;
pub use snapshot::CatalogSnapshot;
pub use store::{Collection, Record, StoreError};
