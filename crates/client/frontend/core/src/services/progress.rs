//! Drives a [`TimelineConsumer`] from the stage bus.
//!
//! The driver owns the consumer, applies every received [`StageEvent`] and
//! republishes a [`ProgressView`] on a watch channel whenever the view
//! changes. Reaching `decrypt-output` arms a one-shot timer that hides the
//! progress indicator after [`ProgressConfig::hide_delay`]. The timer is not
//! cancelled by later events; a progress stage reached afterwards shows the
//! indicator again.
//!
//! [`ProgressConfig::hide_delay`]: crate::config::ProgressConfig::hide_delay

use runtime::StageEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::time::{self, Duration, Instant};

use crate::config::FrontendConfig;
use crate::event::{EventImpact, TimelineConsumer};
use crate::view_model::ProgressView;

pub struct TimelineDriver {
    consumer: TimelineConsumer,
    hide_delay: Duration,
    message_limit: usize,
    snapshots: watch::Sender<ProgressView>,
}

impl TimelineDriver {
    pub fn new(config: &FrontendConfig) -> (Self, watch::Receiver<ProgressView>) {
        let consumer = TimelineConsumer::new(&config.messages);
        let message_limit = config.messages.capacity;
        let initial = ProgressView::from_state(consumer.state(), consumer.message_log(), message_limit);
        let (snapshots, rx) = watch::channel(initial);

        let driver = Self {
            consumer,
            hide_delay: config.progress.hide_delay,
            message_limit,
            snapshots,
        };
        (driver, rx)
    }

    /// Runs until the bus closes, then returns the consumer.
    ///
    /// A hide timer still pending when the bus closes is allowed to elapse
    /// first, so the final state never shows a stale indicator.
    pub async fn run(mut self, mut events: broadcast::Receiver<StageEvent>) -> TimelineConsumer {
        let mut hide_at: Option<Instant> = None;

        loop {
            let deadline = hide_at;
            tokio::select! {
                result = events.recv() => match result {
                    Ok(event) => {
                        let impact = self.consumer.on_event(&event);
                        if impact.schedule_progress_hide {
                            hide_at = Some(Instant::now() + self.hide_delay);
                        }
                        self.apply(impact);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Timeline lagged behind the stage bus; skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = async { time::sleep_until(deadline.unwrap_or_else(Instant::now)).await }, if deadline.is_some() => {
                    hide_at = None;
                    let impact = self.consumer.hide_progress();
                    self.apply(impact);
                }
            }
        }

        if let Some(deadline) = hide_at {
            time::sleep_until(deadline).await;
            let impact = self.consumer.hide_progress();
            self.apply(impact);
        }

        tracing::debug!("Stage bus closed; timeline driver stopped");
        self.consumer
    }

    fn apply(&self, impact: EventImpact) {
        if !impact.requires_redraw {
            return;
        }
        let view = ProgressView::from_state(
            self.consumer.state(),
            self.consumer.message_log(),
            self.message_limit,
        );
        // Snapshots are advisory; nobody watching is fine.
        self.snapshots.send_replace(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{GameId, StageKey};
    use runtime::{ActionKind, StageBus};

    fn reached(action: ActionKind, stage: StageKey) -> StageEvent {
        StageEvent::StageReached { action, stage }
    }

    #[tokio::test(start_paused = true)]
    async fn indicator_hides_after_configured_delay() {
        let bus = StageBus::new();
        let (driver, mut snapshots) = TimelineDriver::new(&FrontendConfig::default());
        let handle = tokio::spawn(driver.run(bus.subscribe()));

        bus.publish(reached(ActionKind::FetchResult, StageKey::DecryptOutput));
        snapshots.changed().await.unwrap();
        assert!(snapshots.borrow_and_update().visible);
        let shown_at = Instant::now();

        snapshots.changed().await.unwrap();
        assert!(!snapshots.borrow_and_update().visible);
        assert!(shown_at.elapsed() >= Duration::from_millis(1500));

        drop(bus);
        let consumer = handle.await.unwrap();
        assert_eq!(
            consumer.state().active_stage(),
            Some(StageKey::DecryptOutput)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pending_hide_is_applied_when_bus_closes() {
        let bus = StageBus::new();
        let (driver, _snapshots) = TimelineDriver::new(&FrontendConfig::default());
        let rx = bus.subscribe();

        bus.publish(StageEvent::ActionStarted {
            action: ActionKind::SubmitMove,
            game_id: GameId::new(1),
        });
        bus.publish(reached(ActionKind::SubmitMove, StageKey::PrepareClient));
        bus.publish(reached(ActionKind::FetchResult, StageKey::DecryptOutput));
        drop(bus);

        let consumer = driver.run(rx).await;
        assert!(!consumer.state().progress_visible());
        assert_eq!(consumer.state().timeline().len(), 2);
    }

    #[tokio::test]
    async fn fallback_round_is_reflected_in_snapshots() {
        let bus = StageBus::new();
        let (driver, snapshots) = TimelineDriver::new(&FrontendConfig::default());
        let rx = bus.subscribe();

        bus.publish(reached(ActionKind::SubmitMove, StageKey::PrepareClient));
        bus.publish(reached(ActionKind::SubmitMove, StageKey::FallbackMode));
        drop(bus);

        let consumer = driver.run(rx).await;
        let view = snapshots.borrow();
        assert!(view.fallback);
        assert!(!view.visible);
        assert!(consumer.state().fallback_triggered());
    }
}
