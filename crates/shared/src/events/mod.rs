use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Topic published after every successful cart mutation. Carries the
/// authoritative cart plus summary, or null data to signal a full refresh.
pub const CART_UPDATED: &str = "cart.updated";

/// Topic published after a confirmed reaction change, keyed by review id.
pub const REACTION_UPDATED: &str = "review.reaction.updated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub event_type: String,
    pub aggregate_id: String,
    pub data: Value,
    pub timestamp: String,
    pub version: i32,
}

impl DomainEvent {
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        data: Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: 1,
        }
    }
}

/// In-process publish/subscribe channel. Any UI region that displays cart
/// totals or per-review counters subscribes here instead of being handed
/// state through the component tree.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishing with no live subscribers is not a failure; the event is
    /// simply dropped.
    pub fn publish(&self, event: DomainEvent) {
        let event_type = event.event_type.clone();
        let aggregate_id = event.aggregate_id.clone();

        match self.sender.send(event) {
            Ok(receivers) => {
                info!("Event published: type={event_type}, aggregate_id={aggregate_id}, receivers={receivers}");
            }
            Err(_) => {
                debug!("Event dropped, no subscribers: type={event_type}");
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_without_subscribers_does_not_panic() {
        let bus = EventBus::new(4);
        bus.publish(DomainEvent::new(CART_UPDATED, "1", Value::Null));
    }

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::new(
            REACTION_UPDATED,
            "9",
            json!({"likes": 4, "dislikes": 1}),
        ));

        let event = rx.recv().await.expect("event should be delivered");
        assert_eq!(event.event_type, REACTION_UPDATED);
        assert_eq!(event.aggregate_id, "9");
        assert_eq!(event.version, 1);
    }
}
