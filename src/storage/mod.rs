// FILE: src/storage/mod.rs
pub mod codec;
pub mod connection;
pub mod cursor;
pub mod file_index;
pub mod transaction;

// Common exports
pub use connection::Store;
pub use cursor::{Cursor, CursorMut};
pub use transaction::{ReadTx, WriteTx};

use serde::{Deserialize, Serialize};
use crate::error::Result;

// Data Types
/// A path and the canonical (sorted, deduplicated) set of its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub tags: Vec<String>,
}

impl Entry {
    pub(crate) fn decode(path: String, value: &[u8]) -> Result<Self> {
        let tags = codec::decode(&path, value)?;
        Ok(Self { path, tags })
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.path, self.tags.join(", "))
    }
}
