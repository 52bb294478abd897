use super::dimension::Dimension;
use crate::error::CoreError;
use crate::storage::Record;
use crate::votes::VoteTally;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    /// Product name at submission time; not kept in sync afterwards.
    #[serde(default)]
    pub product_name: String,
    pub user_id: String,
    pub username: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub dimensions: BTreeMap<Dimension, DimensionScore>,
    #[serde(flatten)]
    pub votes: VoteTally,
    pub date: DateTime<Utc>,
}

impl Review {
    pub fn dimension_score(&self, dimension: Dimension) -> Option<u8> {
        self.dimensions.get(&dimension).map(|d| d.score)
    }
}

impl Record for Review {
    const COLLECTION: &'static str = "reviews";
    type Patch = VoteTally;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &VoteTally) {
        self.votes = patch.clone();
    }
}

/// Review submission as received from a client. Author, date and product
/// name are stamped by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub dimensions: BTreeMap<Dimension, DimensionScore>,
}

fn score_in_range(score: u8) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

impl NewReview {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.product_id.trim().is_empty() {
            return Err(CoreError::Validation("Product ID cannot be empty".to_string()));
        }
        if !score_in_range(self.rating) {
            return Err(CoreError::Validation(format!(
                "Rating must be between {MIN_SCORE} and {MAX_SCORE}"
            )));
        }
        if let Some((dimension, _)) = self
            .dimensions
            .iter()
            .find(|(_, value)| !score_in_range(value.score))
        {
            return Err(CoreError::Validation(format!(
                "{dimension} score must be between {MIN_SCORE} and {MAX_SCORE}"
            )));
        }
        Ok(())
    }
}
