use std::time::Duration;

use login_throttle_application::LoginThrottleService;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Periodically compacts expired login attempt records until `shutdown`
/// flips to `true` or its sender is dropped.
pub fn spawn_attempt_sweeper(
    login_throttle: LoginThrottleService,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_seconds = interval.as_secs(),
            "login attempt sweeper started"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    login_throttle.purge_expired();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("login attempt sweeper stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use login_throttle_application::{
        BAN_DURATION, LoginThrottlePolicy, LoginThrottleService,
    };
    use login_throttle_domain::ClientKey;
    use login_throttle_infrastructure::{InMemoryAttemptStore, ManualClock};
    use tokio::sync::watch;

    use super::spawn_attempt_sweeper;

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_expired_records_and_stops_on_shutdown() {
        let clock = Arc::new(ManualClock::new());
        let login_throttle = LoginThrottleService::new(
            Arc::new(InMemoryAttemptStore::new()),
            clock.clone(),
            LoginThrottlePolicy::default(),
        );
        let client = ClientKey::new("10.0.0.1").unwrap_or_else(|_| unreachable!());
        login_throttle.record_failure(&client);
        assert_eq!(login_throttle.tracked_clients(), 1);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper =
            spawn_attempt_sweeper(login_throttle.clone(), Duration::from_secs(1), shutdown_rx);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(login_throttle.tracked_clients(), 1);

        clock.advance(BAN_DURATION);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(login_throttle.tracked_clients(), 0);

        let sent = shutdown_tx.send(true);
        assert!(sent.is_ok());
        assert!(sweeper.await.is_ok());
    }
}
