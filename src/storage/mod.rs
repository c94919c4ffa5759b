pub mod backend;

pub use backend::{create_store, ObjectFetcher, StorageError};
