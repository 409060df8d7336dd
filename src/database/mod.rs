//! Pinmark durable storage.
//!
//! The session and view preferences live under fixed keys in a small SQLite
//! key-value table, behind the [`DurableStore`] trait so tests can swap in
//! [`MemoryStore`].
//!
//! # Usage
//!
//! ```no_run
//! use pinmark::database::{Database, DurableStore};
//!
//! let db = Database::open("pinmark.db").expect("failed to open database");
//! db.set("viewMode", "list").expect("write failed");
//! assert_eq!(db.get("viewMode").unwrap().as_deref(), Some("list"));
//! ```

pub mod kv_store;
pub mod migrations;

pub use kv_store::{Database, DurableStore, MemoryStore};
