//! Typo-tolerant matching of products and categories.

pub mod fuzzy;

pub use fuzzy::{search, DEFAULT_THRESHOLD};
