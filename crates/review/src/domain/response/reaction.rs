use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Dislike,
}

/// A user's active vote on a review. At most one is active per review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserReaction {
    #[default]
    None,
    Like,
    Dislike,
}

impl UserReaction {
    /// True when the pressed button matches the active reaction, which turns
    /// the press into a toggle-off.
    pub fn matches(&self, pressed: ReactionType) -> bool {
        matches!(
            (self, pressed),
            (UserReaction::Like, ReactionType::Like)
                | (UserReaction::Dislike, ReactionType::Dislike)
        )
    }
}

/// Counters owned by the review service; never incremented locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReactionStats {
    pub likes: i64,
    pub dislikes: i64,
}

/// Wire shape returned by both reaction endpoints. `reaction_stats` may be
/// absent on a malformed success response and is repaired before caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionResponse {
    #[serde(rename = "user_reaction")]
    pub user_reaction: UserReaction,
    #[serde(rename = "reaction_stats")]
    pub reaction_stats: Option<ReactionStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewReactionState {
    #[serde(rename = "user_reaction")]
    pub user_reaction: UserReaction,
    #[serde(rename = "reaction_stats")]
    pub reaction_stats: ReactionStats,
}

/// Outcome of a toggle press. Presses arriving while the same review is in
/// flight resolve with `ignored` set and no call issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionToggleResult {
    #[serde(rename = "review_id")]
    pub review_id: i32,
    pub success: bool,
    pub ignored: bool,
    pub message: String,
    pub state: Option<ReviewReactionState>,
}

impl ReactionToggleResult {
    pub fn applied(review_id: i32, message: impl Into<String>, state: ReviewReactionState) -> Self {
        Self {
            review_id,
            success: true,
            ignored: false,
            message: message.into(),
            state: Some(state),
        }
    }

    pub fn in_flight(review_id: i32) -> Self {
        Self {
            review_id,
            success: false,
            ignored: true,
            message: "Reaction request already in flight".to_string(),
            state: None,
        }
    }

    pub fn failed(review_id: i32, message: impl Into<String>) -> Self {
        Self {
            review_id,
            success: false,
            ignored: false,
            message: message.into(),
            state: None,
        }
    }
}
