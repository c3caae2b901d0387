use crate::domain::{
    requests::reaction::{AddReactionRequest, DeleteReactionRequest},
    response::{api::ApiResponse, reaction::ReactionResponse},
};
use async_trait::async_trait;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynReviewApiClient = Arc<dyn ReviewApiClientTrait + Send + Sync>;

/// Remote review service. Adding a reaction while the opposite one is active
/// replaces it server-side in a single call.
#[async_trait]
pub trait ReviewApiClientTrait {
    async fn add_reaction(
        &self,
        req: &AddReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError>;

    async fn delete_reaction(
        &self,
        req: &DeleteReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError>;
}
