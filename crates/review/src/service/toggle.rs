use crate::{
    abstract_trait::{DynReviewApiClient, ReactionToggleServiceTrait},
    domain::{
        requests::reaction::{AddReactionRequest, DeleteReactionRequest},
        response::{
            api::ApiResponse,
            reaction::{
                ReactionResponse, ReactionStats, ReactionToggleResult, ReactionType,
                ReviewReactionState,
            },
        },
    },
};
use shared::{
    errors::{HttpError, validation_messages},
    events::{DomainEvent, EventBus, REACTION_UPDATED},
    utils::{Metrics, Operation, Status as StatusUtils, TracingContext},
};

use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use serde_json::Value;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, error, info, warn};
use validator::Validate;

/// Owns one user's vote per review and the server-confirmed counters.
/// Pressing the active reaction removes it; pressing the other one replaces
/// it with a single add call. No optimistic counter math anywhere: the cached
/// state is always a verbatim copy of the last confirmed response.
#[derive(Clone)]
pub struct ReactionToggleService {
    client: DynReviewApiClient,
    bus: EventBus,
    states: Arc<Mutex<HashMap<i32, ReviewReactionState>>>,
    in_flight: Arc<Mutex<HashSet<i32>>>,
    metrics: Arc<Mutex<Metrics>>,
}

pub struct ReactionToggleServiceDeps {
    pub client: DynReviewApiClient,
    pub bus: EventBus,
}

impl ReactionToggleService {
    pub fn new(deps: ReactionToggleServiceDeps, registry: &mut Registry) -> anyhow::Result<Self> {
        let ReactionToggleServiceDeps { client, bus } = deps;

        let metrics = Metrics::new();

        registry.register(
            "reaction_toggle_service_request_counter",
            "Total number of requests to the ReactionToggleService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "reaction_toggle_service_request_duration",
            "Histogram of request durations for the ReactionToggleService",
            metrics.request_duration.clone(),
        );

        Ok(Self {
            client,
            bus,
            states: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            metrics: Arc::new(Mutex::new(metrics)),
        })
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("reaction-toggle-service")
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

    /// A 2xx response without counters is repaired to zeroed stats instead of
    /// caching an absent value.
    fn repair(review_id: i32, response: ReactionResponse) -> ReviewReactionState {
        let reaction_stats = match response.reaction_stats {
            Some(stats) => stats,
            None => {
                warn!(
                    "⚠️ Reaction response for review_id={review_id} missing reaction_stats, substituting zeroed counters"
                );
                ReactionStats::default()
            }
        };

        ReviewReactionState {
            user_reaction: response.user_reaction,
            reaction_stats,
        }
    }

    async fn settle(
        &self,
        review_id: i32,
        operation: Operation,
        tracing_ctx: TracingContext,
        result: Result<ApiResponse<ReactionResponse>, HttpError>,
    ) -> ReactionToggleResult {
        match result {
            Ok(response) => {
                let ApiResponse { message, data, .. } = response;
                let state = Self::repair(review_id, data);

                self.states.lock().await.insert(review_id, state.clone());

                self.bus.publish(DomainEvent::new(
                    REACTION_UPDATED,
                    review_id.to_string(),
                    serde_json::to_value(&state).unwrap_or(Value::Null),
                ));

                info!(
                    "✅ Reaction confirmed for review_id={review_id}: {:?}",
                    state.user_reaction
                );

                self.complete_tracing_success(&tracing_ctx, operation, "Reaction updated")
                    .await;

                ReactionToggleResult::applied(review_id, message, state)
            }
            Err(e) => {
                error!("❌ Failed to update reaction for review_id={review_id}: {e:?}");

                self.complete_tracing_error(&tracing_ctx, operation, "Failed to update reaction")
                    .await;

                ReactionToggleResult::failed(review_id, e.user_message())
            }
        }
    }
}

#[async_trait]
impl ReactionToggleServiceTrait for ReactionToggleService {
    async fn prime(&self, review_id: i32, state: ReviewReactionState) {
        self.states.lock().await.insert(review_id, state);
    }

    async fn current(&self, review_id: i32) -> Option<ReviewReactionState> {
        self.states.lock().await.get(&review_id).cloned()
    }

    async fn toggle(&self, review_id: i32, pressed: ReactionType) -> ReactionToggleResult {
        let request = AddReactionRequest {
            review_id,
            reaction_type: pressed,
        };

        if let Err(validation_errors) = request.validate() {
            let messages = validation_messages(&validation_errors);
            warn!("⚠️ Rejected reaction toggle before dispatch: {messages:?}");

            return ReactionToggleResult::failed(review_id, messages.join("; "));
        }

        // The guard is per review id: presses on other reviews proceed while
        // this one is in flight.
        if !self.in_flight.lock().await.insert(review_id) {
            debug!("Reaction request already in flight for review_id={review_id}, ignoring press");

            return ReactionToggleResult::in_flight(review_id);
        }

        let current = self
            .states
            .lock()
            .await
            .get(&review_id)
            .cloned()
            .unwrap_or_default();

        let outcome = if current.user_reaction.matches(pressed) {
            info!("🗑️ Removing reaction {pressed:?} from review_id={review_id}");

            let operation = Operation::RemoveReaction;
            let tracing_ctx = self.start_tracing(
                "remove_reaction",
                vec![
                    KeyValue::new("component", "review"),
                    KeyValue::new("operation", "remove_reaction"),
                    KeyValue::new("review.id", review_id.to_string()),
                ],
            );

            let result = self
                .client
                .delete_reaction(&DeleteReactionRequest { review_id })
                .await;

            self.settle(review_id, operation, tracing_ctx, result).await
        } else {
            info!(
                "🏗️ Applying reaction {pressed:?} to review_id={review_id} (was {:?})",
                current.user_reaction
            );

            let operation = Operation::AddReaction;
            let tracing_ctx = self.start_tracing(
                "add_reaction",
                vec![
                    KeyValue::new("component", "review"),
                    KeyValue::new("operation", "add_reaction"),
                    KeyValue::new("review.id", review_id.to_string()),
                ],
            );

            let result = self.client.add_reaction(&request).await;

            self.settle(review_id, operation, tracing_ctx, result).await
        };

        self.in_flight.lock().await.remove(&review_id);

        outcome
    }
}
