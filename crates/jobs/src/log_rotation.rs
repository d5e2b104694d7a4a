use ferrous_doh_application::use_cases::RotateLogUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// Tick period, clamped so the first deadline stays representable.
fn rotation_period(interval_secs: u64) -> Duration {
    Duration::from_secs(interval_secs.clamp(1, MAX_INTERVAL_SECS))
}

/// Periodically archives the log file once it outgrows its size threshold.
///
/// The first check happens one full interval after start.
pub struct LogRotationJob {
    rotate_log: Arc<RotateLogUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl LogRotationJob {
    pub fn new(rotate_log: Arc<RotateLogUseCase>, interval_secs: u64) -> Self {
        Self {
            rotate_log,
            interval_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            max_size = self.rotate_log.max_size(),
            "Starting log rotation job"
        );

        tokio::spawn(async move {
            let period = rotation_period(self.interval_secs);
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("LogRotationJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.rotate_log.execute().await {
                            error!(error = %e, "Log rotation failed");
                        }
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_period_is_clamped() {
        assert_eq!(rotation_period(0), Duration::from_secs(1));
        assert_eq!(rotation_period(600), Duration::from_secs(600));

        let longest = rotation_period(u64::MAX);
        assert_eq!(longest, Duration::from_secs(MAX_INTERVAL_SECS));
        assert!(Instant::now().checked_add(longest).is_some());
    }
}
