//! findash-store: the persisted balance series (CSV file or in-memory).

pub mod backend;
pub mod codec;
pub mod error;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::StoreError;
pub use store::SeriesStore;
