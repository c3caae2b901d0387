use crate::domain::{
    requests::cart::{AddToCartRequest, MergeCartRequest, UpdateCartItemRequest},
    response::{api::ApiResponse, cart::CartResponse},
};
use async_trait::async_trait;
use shared::errors::HttpError;
use std::sync::Arc;

pub type DynCartApiClient = Arc<dyn CartApiClientTrait + Send + Sync>;

/// Remote cart service. Every call returns the authoritative cart embedded in
/// the response; the synchronizer never derives cart contents itself.
#[async_trait]
pub trait CartApiClientTrait {
    async fn fetch_cart(&self) -> Result<ApiResponse<CartResponse>, HttpError>;

    async fn add_item(&self, req: &AddToCartRequest)
    -> Result<ApiResponse<CartResponse>, HttpError>;

    async fn update_item(
        &self,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, HttpError>;

    async fn remove_item(&self, item_id: i32) -> Result<ApiResponse<CartResponse>, HttpError>;

    async fn clear_cart(&self) -> Result<ApiResponse<CartResponse>, HttpError>;

    async fn merge_cart(&self, req: &MergeCartRequest)
    -> Result<ApiResponse<CartResponse>, HttpError>;
}
