// FILE: src/engine/mod.rs
pub mod matcher;
pub mod renamer;
pub mod searcher;

pub use matcher::{matches, Filter};
pub use renamer::Renamer;
pub use searcher::Searcher;
