//! Persistent client-side storage.
//!
//! The page remembers a handful of values between visits, the same way a
//! browser page would with `localStorage`. Values survive restarts of the
//! binary through a JSON file in the data directory.
//!
//! # Modules
//!
//! - `backend`: [`ClientStorage`] trait and the in-memory implementation
//! - `json`: JSON file-based implementation
//! - `models`: on-disk record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{ClientStorage, MemoryClientStorage, USER_ID_KEY};
pub use json::JsonClientStorage;
pub use models::StoredItem;
