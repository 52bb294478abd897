//! Like/dislike bookkeeping for reviews.

pub mod ledger;

pub use ledger::{toggle, Axis, VoteTally};
