//! bore: a local file-tagging index
//!
//! Maps absolute file paths to sets of text tags, stored in one SQLite table:
//! - storage (session, transactions, cursor, tag encoding, point operations)
//! - engine (tag filters, whole-index search, bulk tag rename)
//!
//! A caller opens a `Store` once, begins a `ReadTx` or `WriteTx` per logical
//! operation, and commits write transactions explicitly.

pub mod config;
pub mod engine;
pub mod error;
pub mod storage;

pub use config::Config;
pub use error::{Result, BoreError};
pub use engine::{matches, Filter, Renamer, Searcher};
// Export the common storage types
pub use storage::{
    Store,
    ReadTx,
    WriteTx,
    Cursor,
    CursorMut,
    Entry,
};
