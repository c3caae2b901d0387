use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::response::cart::{CartResponse, CartSummary};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartOperationKind {
    FetchCart,
    AddToCart { product_id: i32, quantity: i32 },
    UpdateCartItem { item_id: i32, quantity: i32 },
    RemoveFromCart { item_id: i32 },
    ClearCart,
    MergeCart { source_cart_id: i32 },
}

/// Trace of the most recently attempted operation, written before the network
/// call is issued. Not an undo log; carries no transactional semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartOperationRecord {
    pub operation: CartOperationKind,
    #[serde(rename = "trace_id")]
    pub trace_id: String,
    #[serde(rename = "recorded_at")]
    pub recorded_at: String,
}

impl CartOperationRecord {
    pub fn new(operation: CartOperationKind) -> Self {
        Self {
            operation,
            trace_id: Uuid::new_v4().to_string(),
            recorded_at: Utc::now().to_rfc3339(),
        }
    }
}

/// The session's cached view of the authoritative server cart. Replaced
/// wholesale on every confirmed mutation, never patched incrementally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    pub cart: Option<CartResponse>,
    pub summary: CartSummary,
    pub loading: bool,
    pub error: Option<String>,
    #[serde(rename = "last_operation")]
    pub last_operation: Option<CartOperationRecord>,
}
