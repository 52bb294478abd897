//! Per-product rating aggregates derived from the review set.

pub mod aggregator;

pub use aggregator::{average_rating, refresh};
