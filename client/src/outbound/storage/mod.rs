//! Persistent storage adapters for the key/value port.

mod file_storage;

pub use file_storage::FileKeyValueStorage;
