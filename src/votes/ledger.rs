use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Like,
    Dislike,
}

impl Axis {
    pub fn opposite(self) -> Axis {
        match self {
            Axis::Like => Axis::Dislike,
            Axis::Dislike => Axis::Like,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Like => "like",
            Axis::Dislike => "dislike",
        }
    }
}

/// Where a single user stands on a single review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    Neutral,
    Liked,
    Disliked,
}

/// Vote fields of a review. Counters always equal the sizes of their sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub liked_by: BTreeSet<String>,
    #[serde(default)]
    pub disliked_by: BTreeSet<String>,
}

impl VoteTally {
    pub fn state_of(&self, user_id: &str) -> VoteState {
        if self.voters(Axis::Like).contains(user_id) {
            VoteState::Liked
        } else if self.voters(Axis::Dislike).contains(user_id) {
            VoteState::Disliked
        } else {
            VoteState::Neutral
        }
    }

    pub fn voters(&self, axis: Axis) -> &BTreeSet<String> {
        match axis {
            Axis::Like => &self.liked_by,
            Axis::Dislike => &self.disliked_by,
        }
    }

    fn voters_mut(&mut self, axis: Axis) -> &mut BTreeSet<String> {
        match axis {
            Axis::Like => &mut self.liked_by,
            Axis::Dislike => &mut self.disliked_by,
        }
    }

    /// Counters match their sets and no user sits on both axes.
    pub fn is_consistent(&self) -> bool {
        self.likes as usize == self.liked_by.len()
            && self.dislikes as usize == self.disliked_by.len()
            && self.liked_by.is_disjoint(&self.disliked_by)
    }

    fn recount(&mut self) {
        self.likes = self.liked_by.len() as u32;
        self.dislikes = self.disliked_by.len() as u32;
    }
}

/// Toggle `user_id`'s vote on `axis`.
///
/// A user already on `axis` returns to neutral. Anyone else lands on `axis`
/// and is cleared from the opposite one in the same transition.
pub fn toggle(tally: &VoteTally, axis: Axis, user_id: &str) -> VoteTally {
    let mut next = tally.clone();

    if !next.voters_mut(axis).remove(user_id) {
        next.voters_mut(axis.opposite()).remove(user_id);
        next.voters_mut(axis).insert(user_id.to_string());
    }

    next.recount();
    debug_assert!(next.is_consistent(), "{next:?}");
    next
}
