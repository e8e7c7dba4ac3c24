//! Broadcast bus for stage events.

use tokio::sync::broadcast;

use super::types::StageEvent;

/// Fan-out channel for [`StageEvent`]s.
///
/// Publishing is best-effort: with no subscribers the event is dropped, and
/// slow subscribers observe `RecvError::Lagged` rather than blocking the
/// action that emits.
#[derive(Clone)]
pub struct StageBus {
    sender: broadcast::Sender<StageEvent>,
}

impl StageBus {
    /// Creates a new bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: StageEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers - this is normal, not an error
            tracing::trace!("No subscribers for stage events");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for StageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ActionKind;
    use game_core::{GameId, StageKey};

    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let bus = StageBus::new();
        let mut rx = bus.subscribe();

        bus.publish(StageEvent::ActionStarted {
            action: ActionKind::SubmitMove,
            game_id: GameId::new(1),
        });
        bus.publish(StageEvent::StageReached {
            action: ActionKind::SubmitMove,
            stage: StageKey::PrepareClient,
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            StageEvent::ActionStarted { .. }
        ));
        assert_eq!(
            rx.recv().await.unwrap(),
            StageEvent::StageReached {
                action: ActionKind::SubmitMove,
                stage: StageKey::PrepareClient,
            }
        );
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = StageBus::with_capacity(0);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(StageEvent::ActionSettled {
            action: ActionKind::FetchResult,
            fallback: false,
        });
    }
}
