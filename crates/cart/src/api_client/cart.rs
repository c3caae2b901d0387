use crate::{
    abstract_trait::CartApiClientTrait,
    domain::{
        requests::cart::{AddToCartRequest, MergeCartRequest, UpdateCartItemRequest},
        response::{
            api::ApiResponse,
            cart::{CartEnvelope, CartResponse},
        },
    },
};
use async_trait::async_trait;
use serde::Serialize;
use shared::{errors::HttpError, http::HttpClient};

#[derive(Serialize)]
struct UpdateQuantityBody {
    quantity: i32,
}

pub struct CartApiClient {
    http: HttpClient,
}

impl CartApiClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn wrap(envelope: CartEnvelope) -> ApiResponse<CartResponse> {
        let (cart, message) = envelope.into_parts();

        ApiResponse {
            status: "success".to_string(),
            message: message.unwrap_or_else(|| "OK".to_string()),
            data: cart,
        }
    }
}

#[async_trait]
impl CartApiClientTrait for CartApiClient {
    async fn fetch_cart(&self) -> Result<ApiResponse<CartResponse>, HttpError> {
        let envelope: CartEnvelope = self.http.get("/cart").await?;

        Ok(Self::wrap(envelope))
    }

    async fn add_item(
        &self,
        req: &AddToCartRequest,
    ) -> Result<ApiResponse<CartResponse>, HttpError> {
        let envelope: CartEnvelope = self.http.post("/cart/items", req).await?;

        Ok(Self::wrap(envelope))
    }

    async fn update_item(
        &self,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, HttpError> {
        let body = UpdateQuantityBody {
            quantity: req.quantity,
        };

        let envelope: CartEnvelope = self
            .http
            .put(&format!("/cart/items/{}", req.item_id), &body)
            .await?;

        Ok(Self::wrap(envelope))
    }

    async fn remove_item(&self, item_id: i32) -> Result<ApiResponse<CartResponse>, HttpError> {
        let envelope: CartEnvelope = self.http.delete(&format!("/cart/items/{item_id}")).await?;

        Ok(Self::wrap(envelope))
    }

    async fn clear_cart(&self) -> Result<ApiResponse<CartResponse>, HttpError> {
        let envelope: CartEnvelope = self.http.delete("/cart").await?;

        Ok(Self::wrap(envelope))
    }

    async fn merge_cart(
        &self,
        req: &MergeCartRequest,
    ) -> Result<ApiResponse<CartResponse>, HttpError> {
        let envelope: CartEnvelope = self.http.post("/cart/merge", req).await?;

        Ok(Self::wrap(envelope))
    }
}
