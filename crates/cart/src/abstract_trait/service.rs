use crate::{
    domain::{
        requests::cart::{AddToCartRequest, MergeCartRequest, UpdateCartItemRequest},
        response::cart::CartOperationResult,
    },
    state::CartState,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCartSyncService = Arc<dyn CartSyncServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartSyncServiceTrait {
    async fn fetch_cart(&self) -> CartOperationResult;

    async fn add_to_cart(&self, req: &AddToCartRequest) -> CartOperationResult;

    async fn update_cart_item(&self, req: &UpdateCartItemRequest) -> CartOperationResult;

    async fn remove_from_cart(&self, item_id: i32) -> CartOperationResult;

    async fn clear_cart(&self) -> CartOperationResult;

    async fn merge_cart(&self, req: &MergeCartRequest) -> CartOperationResult;

    async fn snapshot(&self) -> CartState;

    /// Marks the synchronizer decommissioned. Responses resolving afterwards
    /// are dropped instead of overwriting state.
    fn close(&self);
}
