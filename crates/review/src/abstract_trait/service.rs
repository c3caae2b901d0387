use crate::domain::response::reaction::{ReactionToggleResult, ReactionType, ReviewReactionState};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynReactionToggleService = Arc<dyn ReactionToggleServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReactionToggleServiceTrait {
    /// Seeds the cached state for a review, usually from a list fetch.
    async fn prime(&self, review_id: i32, state: ReviewReactionState);

    async fn current(&self, review_id: i32) -> Option<ReviewReactionState>;

    async fn toggle(&self, review_id: i32, pressed: ReactionType) -> ReactionToggleResult;
}
