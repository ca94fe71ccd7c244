//! In-memory storage backend.
//!
//! Keeps every table in a `HashMap` wrapped in `Arc<RwLock<_>>`. Useful for
//! local development and tests where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use usersvc::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Hand the store to AppState...
//! ```

mod store;

pub use store::InMemoryStore;
