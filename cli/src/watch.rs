use std::future::Future;
use std::time::Duration;

use notify_core::{NotificationsApi, NotificationsController, NotificationsView, Task};
use tracing::info;

/// Runs a poll tick every `interval` until `shutdown` resolves.
///
/// `shutdown` is polled as one future for the whole loop, so a signal that
/// arrives while a tick is still waiting on the backend ends the loop as soon
/// as that tick returns.
pub async fn poll_until<A, V, S>(
    controller: &NotificationsController<A, V>,
    interval: Duration,
    shutdown: S,
) where
    A: NotificationsApi,
    V: NotificationsView,
    S: Future,
{
    tokio::pin!(shutdown);

    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; the initial load already covered it.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("stopping");
                break;
            }
            _ = ticker.tick() => controller.run(Task::CheckForUpdates).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use notify_core::{ControllerConfig, NotificationList, NotifyError};

    use super::*;
    use crate::terminal::TerminalView;

    /// Backend whose count request takes a while to answer.
    struct SlowCount {
        delay: Duration,
        polls: Cell<usize>,
    }

    impl NotificationsApi for SlowCount {
        async fn list(&self, _limit: u32, _offset: u32) -> Result<NotificationList, NotifyError> {
            Ok(NotificationList::default())
        }

        async fn count(&self) -> Result<i64, NotifyError> {
            self.polls.set(self.polls.get() + 1);
            tokio::time::sleep(self.delay).await;
            Ok(1)
        }

        async fn mark_all_read(&self) -> Result<(), NotifyError> {
            Ok(())
        }

        async fn mark_read(&self, _id: i64) -> Result<bool, NotifyError> {
            Ok(true)
        }

        async fn delete(&self, _id: i64) -> Result<bool, NotifyError> {
            Ok(true)
        }

        async fn delete_all(&self) -> Result<bool, NotifyError> {
            Ok(true)
        }
    }

    fn controller(delay: Duration) -> NotificationsController<SlowCount, TerminalView> {
        let config = ControllerConfig::default();
        let view = TerminalView::new(&config.empty_label);
        let api = SlowCount {
            delay,
            polls: Cell::new(0),
        };
        NotificationsController::new(api, view, config)
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_during_slow_poll_stops_loop() {
        let controller = controller(Duration::from_secs(10));

        // Fires 5s into the first poll, while the count request is pending.
        let shutdown = tokio::time::sleep(Duration::from_secs(6));
        let finished = tokio::time::timeout(
            Duration::from_secs(60),
            poll_until(&controller, Duration::from_secs(1), shutdown),
        )
        .await;

        assert!(finished.is_ok(), "loop kept polling after shutdown");
        assert_eq!(controller.api().polls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_every_tick_until_shutdown() {
        let controller = controller(Duration::ZERO);

        let shutdown = tokio::time::sleep(Duration::from_millis(3500));
        poll_until(&controller, Duration::from_secs(1), shutdown).await;

        assert_eq!(controller.api().polls.get(), 3);
        assert_eq!(controller.state().last_check, Some(1));
    }
}
