use std::{collections::VecDeque, sync::Arc, time::Duration};

use async_trait::async_trait;
use prometheus_client::registry::Registry;
use review::{
    abstract_trait::{DynReviewApiClient, ReactionToggleServiceTrait, ReviewApiClientTrait},
    domain::{
        requests::reaction::{AddReactionRequest, DeleteReactionRequest},
        response::{
            api::ApiResponse,
            reaction::{
                ReactionResponse, ReactionStats, ReactionType, ReviewReactionState, UserReaction,
            },
        },
    },
    service::{ReactionToggleService, ReactionToggleServiceDeps},
};
use review::di::{DependenciesInject, DependenciesInjectDeps};
use shared::{
    config::Config,
    errors::HttpError,
    events::{EventBus, REACTION_UPDATED},
};
use tokio::sync::{Mutex, oneshot};

type QueuedResponse = (
    Option<oneshot::Receiver<()>>,
    Result<ApiResponse<ReactionResponse>, HttpError>,
);

/// Scripted stand-in for the review service, mirroring the cart test double:
/// queued responses, a call log, optional oneshot gates.
#[derive(Default)]
struct FakeReviewApi {
    responses: Mutex<VecDeque<QueuedResponse>>,
    calls: Mutex<Vec<String>>,
}

impl FakeReviewApi {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    async fn push_ok(&self, user_reaction: UserReaction, stats: Option<ReactionStats>) {
        let response = ReactionResponse {
            user_reaction,
            reaction_stats: stats,
        };
        self.responses
            .lock()
            .await
            .push_back((None, Ok(ok_response(response))));
    }

    async fn push_err(&self, err: HttpError) {
        self.responses.lock().await.push_back((None, Err(err)));
    }

    async fn push_gated(
        &self,
        user_reaction: UserReaction,
        stats: ReactionStats,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let response = ReactionResponse {
            user_reaction,
            reaction_stats: Some(stats),
        };
        self.responses
            .lock()
            .await
            .push_back((Some(rx), Ok(ok_response(response))));
        tx
    }

    async fn next(&self, call: &str) -> Result<ApiResponse<ReactionResponse>, HttpError> {
        self.calls.lock().await.push(call.to_string());

        let (gate, result) = self
            .responses
            .lock()
            .await
            .pop_front()
            .expect("fake review api ran out of queued responses");

        if let Some(gate) = gate {
            let _ = gate.await;
        }

        result
    }

    async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl ReviewApiClientTrait for FakeReviewApi {
    async fn add_reaction(
        &self,
        req: &AddReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError> {
        let kind = match req.reaction_type {
            ReactionType::Like => "like",
            ReactionType::Dislike => "dislike",
        };
        self.next(&format!("add:{}:{kind}", req.review_id)).await
    }

    async fn delete_reaction(
        &self,
        req: &DeleteReactionRequest,
    ) -> Result<ApiResponse<ReactionResponse>, HttpError> {
        self.next(&format!("delete:{}", req.review_id)).await
    }
}

fn ok_response(response: ReactionResponse) -> ApiResponse<ReactionResponse> {
    ApiResponse {
        status: "success".to_string(),
        message: "OK".to_string(),
        data: response,
    }
}

fn stats(likes: i64, dislikes: i64) -> ReactionStats {
    ReactionStats { likes, dislikes }
}

fn state(user_reaction: UserReaction, reaction_stats: ReactionStats) -> ReviewReactionState {
    ReviewReactionState {
        user_reaction,
        reaction_stats,
    }
}

fn service_with(client: Arc<FakeReviewApi>) -> (ReactionToggleService, EventBus) {
    let bus = EventBus::new(16);
    let mut registry = Registry::default();

    let dyn_client: DynReviewApiClient = client;

    let service = ReactionToggleService::new(
        ReactionToggleServiceDeps {
            client: dyn_client,
            bus: bus.clone(),
        },
        &mut registry,
    )
    .expect("reaction toggle service should initialize");

    (service, bus)
}

#[tokio::test]
async fn pressing_like_replaces_state_with_server_response() {
    let api = FakeReviewApi::new();
    api.push_ok(UserReaction::Like, Some(stats(4, 1))).await;

    let (service, _bus) = service_with(api.clone());
    service
        .prime(9, state(UserReaction::None, stats(3, 1)))
        .await;

    let result = service.toggle(9, ReactionType::Like).await;

    assert!(result.success);
    assert!(!result.ignored);

    let confirmed = result.state.expect("state should be returned");
    assert_eq!(confirmed.user_reaction, UserReaction::Like);
    assert_eq!(confirmed.reaction_stats, stats(4, 1));
    assert_eq!(service.current(9).await, Some(confirmed));

    assert_eq!(api.calls().await, vec!["add:9:like"]);
}

#[tokio::test]
async fn double_toggle_returns_to_none_and_original_counters() {
    let api = FakeReviewApi::new();
    api.push_ok(UserReaction::Like, Some(stats(4, 1))).await;
    api.push_ok(UserReaction::None, Some(stats(3, 1))).await;

    let (service, _bus) = service_with(api.clone());
    service
        .prime(9, state(UserReaction::None, stats(3, 1)))
        .await;

    let first = service.toggle(9, ReactionType::Like).await;
    assert!(first.success);

    let second = service.toggle(9, ReactionType::Like).await;
    assert!(second.success);

    assert_eq!(
        service.current(9).await,
        Some(state(UserReaction::None, stats(3, 1)))
    );
    assert_eq!(api.calls().await, vec!["add:9:like", "delete:9"]);
}

#[tokio::test]
async fn switching_reaction_issues_exactly_one_add_call() {
    let api = FakeReviewApi::new();
    api.push_ok(UserReaction::Dislike, Some(stats(3, 2))).await;

    let (service, _bus) = service_with(api.clone());
    service
        .prime(9, state(UserReaction::Like, stats(4, 1)))
        .await;

    let result = service.toggle(9, ReactionType::Dislike).await;
    assert!(result.success);

    assert_eq!(api.calls().await, vec!["add:9:dislike"]);
    assert_eq!(
        service.current(9).await,
        Some(state(UserReaction::Dislike, stats(3, 2)))
    );
}

#[tokio::test]
async fn repeat_press_is_ignored_while_request_in_flight() {
    let api = FakeReviewApi::new();
    let gate = api.push_gated(UserReaction::Like, stats(1, 0)).await;
    api.push_ok(UserReaction::Like, Some(stats(5, 2))).await;

    let (service, _bus) = service_with(api.clone());

    let racing = service.clone();
    let first_press = tokio::spawn(async move { racing.toggle(1, ReactionType::Like).await });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Second press on the same review: no call, resolved as ignored.
    let second = service.toggle(1, ReactionType::Like).await;
    assert!(second.ignored);
    assert!(!second.success);
    assert_eq!(api.calls().await.len(), 1);

    // A press on another review proceeds; the guard is per review.
    let other = service.toggle(2, ReactionType::Like).await;
    assert!(other.success);
    assert_eq!(api.calls().await, vec!["add:1:like", "add:2:like"]);

    gate.send(()).expect("gate receiver alive");
    let first = first_press.await.expect("task should not panic");
    assert!(first.success);

    // Guard released: a new press on the same review goes out again.
    api.push_ok(UserReaction::None, Some(stats(0, 0))).await;
    let after = service.toggle(1, ReactionType::Like).await;
    assert!(after.success);
    assert_eq!(api.calls().await.len(), 3);
}

#[tokio::test]
async fn failed_call_leaves_cached_state_unchanged() {
    let api = FakeReviewApi::new();
    api.push_err(HttpError::Internal("boom".to_string())).await;

    let (service, _bus) = service_with(api.clone());
    service
        .prime(9, state(UserReaction::Like, stats(4, 1)))
        .await;

    let result = service.toggle(9, ReactionType::Dislike).await;

    assert!(!result.success);
    assert!(!result.ignored);
    assert_eq!(
        service.current(9).await,
        Some(state(UserReaction::Like, stats(4, 1)))
    );
}

#[tokio::test]
async fn missing_stats_are_repaired_to_zeroed_counters() {
    let api = FakeReviewApi::new();
    api.push_ok(UserReaction::Like, None).await;

    let (service, _bus) = service_with(api.clone());

    let result = service.toggle(5, ReactionType::Like).await;
    assert!(result.success);

    let confirmed = result.state.expect("state should be returned");
    assert_eq!(confirmed.user_reaction, UserReaction::Like);
    assert_eq!(confirmed.reaction_stats, ReactionStats::default());
}

#[tokio::test]
async fn server_counters_are_cached_verbatim_not_incremented() {
    let api = FakeReviewApi::new();
    // Counters that no local increment could produce.
    api.push_ok(UserReaction::Like, Some(stats(40, 7))).await;

    let (service, _bus) = service_with(api.clone());
    service
        .prime(9, state(UserReaction::None, stats(3, 1)))
        .await;

    let result = service.toggle(9, ReactionType::Like).await;
    assert!(result.success);

    assert_eq!(
        service.current(9).await,
        Some(state(UserReaction::Like, stats(40, 7)))
    );
}

#[tokio::test]
async fn confirmed_reaction_is_published_keyed_by_review_id() {
    let api = FakeReviewApi::new();
    api.push_ok(UserReaction::Like, Some(stats(4, 1))).await;

    let (service, bus) = service_with(api.clone());
    let mut rx = bus.subscribe();

    service.toggle(9, ReactionType::Like).await;

    let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed");

    assert_eq!(event.event_type, REACTION_UPDATED);
    assert_eq!(event.aggregate_id, "9");
    assert_eq!(event.data["user_reaction"], "like");
    assert_eq!(event.data["reaction_stats"]["likes"], 4);
}

#[tokio::test]
async fn dependencies_inject_wires_a_working_toggle_service() {
    let config = Config {
        cart_service_url: "http://localhost:9999".to_string(),
        review_service_url: "http://localhost:9998".to_string(),
        http_timeout_secs: 10,
        event_channel_capacity: 16,
    };
    let mut registry = Registry::default();

    let di = DependenciesInject::new(
        DependenciesInjectDeps {
            config,
            bus: EventBus::new(16),
        },
        &mut registry,
    )
    .expect("dependency container should build");

    assert_eq!(di.reaction_toggle.current(1).await, None);
}

#[tokio::test]
async fn invalid_review_id_is_rejected_before_any_call() {
    let api = FakeReviewApi::new();
    let (service, _bus) = service_with(api.clone());

    let result = service.toggle(0, ReactionType::Like).await;

    assert!(!result.success);
    assert!(!result.ignored);
    assert!(api.calls().await.is_empty());
}
