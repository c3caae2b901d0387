use serde::{Deserialize, Serialize};

/// Denormalized product snapshot carried on each line for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    #[serde(rename = "image_url")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartItemResponse {
    pub id: i32,
    #[serde(rename = "product_id")]
    pub product_id: i32,
    pub quantity: i32,
    pub product: Option<ProductSnapshot>,
}

/// Authoritative cart as returned by the cart service. `total_items` and
/// `total_price` are server-computed; a response missing them is a data-shape
/// anomaly repaired when the summary is derived.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartResponse {
    pub id: i32,
    #[serde(default)]
    pub items: Vec<CartItemResponse>,
    #[serde(rename = "total_items")]
    pub total_items: Option<i64>,
    #[serde(rename = "total_price")]
    pub total_price: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CartSummary {
    #[serde(rename = "total_items")]
    pub total_items: i64,
    #[serde(rename = "total_price")]
    pub total_price: f64,
}

/// The cart service wraps the cart under a `cart` key on some endpoints and
/// returns it bare on others; both shapes must parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CartEnvelope {
    Wrapped {
        cart: CartResponse,
        message: Option<String>,
    },
    Bare(CartResponse),
}

impl CartEnvelope {
    pub fn into_parts(self) -> (CartResponse, Option<String>) {
        match self {
            CartEnvelope::Wrapped { cart, message } => (cart, message),
            CartEnvelope::Bare(cart) => (cart, None),
        }
    }
}

/// Uniform outcome of every cart operation. Failures resolve here too, never
/// as an `Err` the caller has to catch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartOperationResult {
    pub success: bool,
    pub message: String,
    pub cart: Option<CartResponse>,
    pub error: Option<String>,
}

impl CartOperationResult {
    pub fn ok(message: impl Into<String>, cart: CartResponse) -> Self {
        Self {
            success: true,
            message: message.into(),
            cart: Some(cart),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            cart: None,
            error,
        }
    }
}
