use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::response::reaction::ReactionType;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AddReactionRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "review_id")]
    pub review_id: i32,

    #[serde(rename = "reaction_type")]
    pub reaction_type: ReactionType,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DeleteReactionRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "review_id")]
    pub review_id: i32,
}
