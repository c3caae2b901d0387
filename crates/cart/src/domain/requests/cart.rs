use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct AddToCartRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "product_id")]
    pub product_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl AddToCartRequest {
    /// Single unit of a product, the default for a plain "add to cart" press.
    pub fn single(product_id: i32) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}

/// Quantity 0 is not a valid update; callers route that to remove instead.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "item_id")]
    pub item_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct MergeCartRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "source_cart_id")]
    pub source_cart_id: i32,
}
