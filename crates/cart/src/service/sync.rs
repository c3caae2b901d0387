use crate::{
    abstract_trait::{CartSyncServiceTrait, DynCartApiClient},
    domain::{
        requests::cart::{AddToCartRequest, MergeCartRequest, UpdateCartItemRequest},
        response::{
            api::ApiResponse,
            cart::{CartOperationResult, CartResponse, CartSummary},
        },
    },
    state::{CartOperationKind, CartOperationRecord, CartState},
};
use shared::{
    errors::{HttpError, validation_messages},
    events::{CART_UPDATED, DomainEvent, EventBus},
    utils::{Metrics, Operation, Status as StatusUtils, TracingContext},
};

use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use tracing::{debug, error, info, warn};
use validator::Validate;

/// Mediates every cart mutation and keeps all subscribed consumers consistent
/// with the authoritative server cart. Concurrent operations are not
/// serialized: the last response to resolve overwrites local state.
#[derive(Clone)]
pub struct CartSyncService {
    client: DynCartApiClient,
    bus: EventBus,
    state: Arc<RwLock<CartState>>,
    closed: Arc<AtomicBool>,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct CartSyncServiceDeps {
    pub client: DynCartApiClient,
    pub bus: EventBus,
}

impl CartSyncService {
    pub fn new(deps: CartSyncServiceDeps, registry: &mut Registry) -> anyhow::Result<Self> {
        let CartSyncServiceDeps { client, bus } = deps;

        let metrics = Metrics::new();

        registry.register(
            "cart_sync_service_request_counter",
            "Total number of requests to the CartSyncService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "cart_sync_service_request_duration",
            "Histogram of request durations for the CartSyncService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            client,
            bus,
            state: Arc::new(RwLock::new(CartState::default())),
            closed: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(Mutex::new(metrics)),
        })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("cart-sync-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Client)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![
                KeyValue::new("operation", operation_name.to_string()),
                KeyValue::new("timestamp", start_time.elapsed().as_secs_f64().to_string()),
            ],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    async fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        operation: Operation,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, operation, true, message)
            .await;
    }

    async fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        operation: Operation,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, operation, false, error_message)
            .await;
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        operation: Operation,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.lock().await.record(operation, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn closed_result() -> CartOperationResult {
        CartOperationResult::failed("Cart synchronizer is closed", None)
    }

    async fn record_operation(&self, operation: CartOperationKind) {
        let mut state = self.state.write().await;
        state.last_operation = Some(CartOperationRecord::new(operation));
    }

    /// Server-computed aggregates, repaired when the response omits them.
    /// The item count falls back to the number of lines; the price falls back
    /// to zero. Line-item math is never done here.
    fn summarize(cart: &CartResponse) -> CartSummary {
        let total_items = match cart.total_items {
            Some(count) => count,
            None => {
                warn!(
                    "⚠️ Cart response missing total_items, falling back to item count for cart_id={}",
                    cart.id
                );
                cart.items.len() as i64
            }
        };

        let total_price = match cart.total_price {
            Some(price) => price,
            None => {
                warn!(
                    "⚠️ Cart response missing total_price, defaulting to zero for cart_id={}",
                    cart.id
                );
                0.0
            }
        };

        CartSummary {
            total_items,
            total_price,
        }
    }

    /// Replaces the local cart wholesale with the confirmed server cart and
    /// broadcasts it. A response resolving after `close()` is dropped.
    async fn apply_success(&self, response: ApiResponse<CartResponse>) -> CartOperationResult {
        if self.is_closed() {
            debug!("Cart synchronizer closed, dropping late response");
            return Self::closed_result();
        }

        let ApiResponse { message, data: cart, .. } = response;
        let summary = Self::summarize(&cart);

        {
            let mut state = self.state.write().await;
            state.cart = Some(cart.clone());
            state.summary = summary.clone();
            state.error = None;
        }

        self.bus.publish(DomainEvent::new(
            CART_UPDATED,
            cart.id.to_string(),
            json!({ "cart": &cart, "summary": &summary }),
        ));

        CartOperationResult::ok(message, cart)
    }

    fn failure_result(error: HttpError) -> CartOperationResult {
        CartOperationResult::failed(error.user_message(), Some(error.to_string()))
    }
}

#[async_trait]
impl CartSyncServiceTrait for CartSyncService {
    async fn fetch_cart(&self) -> CartOperationResult {
        info!("🛒 Fetching cart");

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::FetchCart;

        let tracing_ctx = self.start_tracing(
            "fetch_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "fetch"),
            ],
        );

        self.record_operation(CartOperationKind::FetchCart).await;

        {
            let mut state = self.state.write().await;
            state.loading = true;
        }

        let outcome = match self.client.fetch_cart().await {
            Ok(response) => {
                info!("✅ Cart fetched: cart_id={}", response.data.id);

                self.complete_tracing_success(&tracing_ctx, operation, "Cart fetched successfully")
                    .await;

                self.apply_success(response).await
            }
            Err(e) => {
                error!("❌ Failed to fetch cart: {e:?}");

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to fetch cart")
                    .await;

                let message = e.user_message();

                {
                    let mut state = self.state.write().await;
                    state.error = Some(message.clone());
                }

                CartOperationResult::failed(message, Some(e.to_string()))
            }
        };

        {
            let mut state = self.state.write().await;
            state.loading = false;
        }

        outcome
    }

    async fn add_to_cart(&self, req: &AddToCartRequest) -> CartOperationResult {
        info!(
            "🛒 Adding to cart: product_id={}, quantity={}",
            req.product_id, req.quantity
        );

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::AddItem;

        let tracing_ctx = self.start_tracing(
            "add_to_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "add"),
                KeyValue::new("cart.product_id", req.product_id.to_string()),
            ],
        );

        self.record_operation(CartOperationKind::AddToCart {
            product_id: req.product_id,
            quantity: req.quantity,
        })
        .await;

        if let Err(validation_errors) = req.validate() {
            let messages = validation_messages(&validation_errors);
            warn!("⚠️ Rejected add_to_cart before dispatch: {messages:?}");

            self.complete_tracing_error(&tracing_ctx, operation, "Validation failed")
                .await;

            return CartOperationResult::failed(messages.join("; "), None);
        }

        match self.client.add_item(req).await {
            Ok(response) => {
                info!("✅ Product added to cart: product_id={}", req.product_id);

                self.complete_tracing_success(&tracing_ctx, operation, "Product added to cart")
                    .await;

                self.apply_success(response).await
            }
            Err(e) => {
                error!(
                    "❌ Failed to add product_id={} to cart: {e:?}",
                    req.product_id
                );

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to add product to cart")
                    .await;

                Self::failure_result(e)
            }
        }
    }

    async fn update_cart_item(&self, req: &UpdateCartItemRequest) -> CartOperationResult {
        info!(
            "✏️ Updating cart item: item_id={}, quantity={}",
            req.item_id, req.quantity
        );

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::UpdateItem;

        let tracing_ctx = self.start_tracing(
            "update_cart_item",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "update"),
                KeyValue::new("cart.item_id", req.item_id.to_string()),
            ],
        );

        self.record_operation(CartOperationKind::UpdateCartItem {
            item_id: req.item_id,
            quantity: req.quantity,
        })
        .await;

        if let Err(validation_errors) = req.validate() {
            let messages = validation_messages(&validation_errors);
            warn!("⚠️ Rejected update_cart_item before dispatch: {messages:?}");

            self.complete_tracing_error(&tracing_ctx, operation, "Validation failed")
                .await;

            return CartOperationResult::failed(messages.join("; "), None);
        }

        match self.client.update_item(req).await {
            Ok(response) => {
                info!("✅ Cart item updated: item_id={}", req.item_id);

                self.complete_tracing_success(&tracing_ctx, operation, "Cart item updated")
                    .await;

                self.apply_success(response).await
            }
            Err(e) => {
                error!("❌ Failed to update item_id={}: {e:?}", req.item_id);

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to update cart item")
                    .await;

                Self::failure_result(e)
            }
        }
    }

    async fn remove_from_cart(&self, item_id: i32) -> CartOperationResult {
        info!("🗑️ Removing cart item: item_id={item_id}");

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::RemoveItem;

        let tracing_ctx = self.start_tracing(
            "remove_from_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "remove"),
                KeyValue::new("cart.item_id", item_id.to_string()),
            ],
        );

        self.record_operation(CartOperationKind::RemoveFromCart { item_id })
            .await;

        match self.client.remove_item(item_id).await {
            Ok(response) => {
                info!("✅ Cart item removed: item_id={item_id}");

                self.complete_tracing_success(&tracing_ctx, operation, "Cart item removed")
                    .await;

                self.apply_success(response).await
            }
            Err(e) => {
                error!("❌ Failed to remove item_id={item_id}: {e:?}");

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to remove cart item")
                    .await;

                Self::failure_result(e)
            }
        }
    }

    async fn clear_cart(&self) -> CartOperationResult {
        info!("🗑️ Clearing cart");

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::ClearCart;

        let tracing_ctx = self.start_tracing(
            "clear_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "clear"),
            ],
        );

        self.record_operation(CartOperationKind::ClearCart).await;

        match self.client.clear_cart().await {
            Ok(response) => {
                if self.is_closed() {
                    debug!("Cart synchronizer closed, dropping late response");
                    return Self::closed_result();
                }

                let ApiResponse { message, data: cart, .. } = response;

                {
                    let mut state = self.state.write().await;
                    state.cart = Some(cart.clone());
                    state.summary = CartSummary::default();
                    state.error = None;
                }

                // Null data signals subscribers to do a full refresh.
                self.bus
                    .publish(DomainEvent::new(CART_UPDATED, cart.id.to_string(), Value::Null));

                info!("✅ Cart cleared: cart_id={}", cart.id);

                self.complete_tracing_success(&tracing_ctx, operation, "Cart cleared")
                    .await;

                CartOperationResult::ok(message, cart)
            }
            Err(e) => {
                error!("❌ Failed to clear cart: {e:?}");

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to clear cart")
                    .await;

                Self::failure_result(e)
            }
        }
    }

    async fn merge_cart(&self, req: &MergeCartRequest) -> CartOperationResult {
        info!("🔄 Merging cart: source_cart_id={}", req.source_cart_id);

        if self.is_closed() {
            return Self::closed_result();
        }

        let operation = Operation::MergeCart;

        let tracing_ctx = self.start_tracing(
            "merge_cart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("operation", "merge"),
                KeyValue::new("cart.source_cart_id", req.source_cart_id.to_string()),
            ],
        );

        self.record_operation(CartOperationKind::MergeCart {
            source_cart_id: req.source_cart_id,
        })
        .await;

        if let Err(validation_errors) = req.validate() {
            let messages = validation_messages(&validation_errors);
            warn!("⚠️ Rejected merge_cart before dispatch: {messages:?}");

            self.complete_tracing_error(&tracing_ctx, operation, "Validation failed")
                .await;

            return CartOperationResult::failed(messages.join("; "), None);
        }

        match self.client.merge_cart(req).await {
            Ok(response) => {
                info!("✅ Cart merged: source_cart_id={}", req.source_cart_id);

                self.complete_tracing_success(&tracing_ctx, operation, "Cart merged")
                    .await;

                self.apply_success(response).await
            }
            Err(e) => {
                error!(
                    "❌ Failed to merge source_cart_id={}: {e:?}",
                    req.source_cart_id
                );

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to merge cart")
                    .await;

                Self::failure_result(e)
            }
        }
    }

    async fn snapshot(&self) -> CartState {
        self.state.read().await.clone()
    }

    fn close(&self) {
        info!("🛑 Closing cart synchronizer");
        self.closed.store(true, Ordering::SeqCst);
    }
}
