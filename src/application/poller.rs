// Poller - fixed-interval fetch loop that keeps the reading buffer fresh
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::application::logger_repository::LoggerRepository;
use crate::application::session::DashboardSession;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// A full status re-sync is performed every this-many polls. There is no
/// backoff or circuit breaker.
pub const DEFAULT_STATUS_STRIDE: u32 = 10;

/// Drives the incremental `cache/{timestamp}` polls while the session is
/// logging. The loop owns its own timer: once the logging flag goes false it
/// stops rescheduling itself, and a caller must start a new run explicitly.
pub struct Poller {
    repository: Arc<dyn LoggerRepository>,
    interval: Duration,
    status_stride: u32,
}

impl Poller {
    pub fn new(repository: Arc<dyn LoggerRepository>) -> Self {
        Self::with_schedule(repository, DEFAULT_POLL_INTERVAL, DEFAULT_STATUS_STRIDE)
    }

    pub fn with_schedule(
        repository: Arc<dyn LoggerRepository>,
        interval: Duration,
        status_stride: u32,
    ) -> Self {
        Self {
            repository,
            interval,
            status_stride,
        }
    }

    /// One incremental fetch-and-merge. A fetch failure leaves the buffer
    /// and `last_seen` untouched; the next scheduled poll proceeds normally.
    /// Returns the number of readings appended.
    pub async fn poll_once(&self, session: &mut DashboardSession) -> usize {
        let since = session.buffer().last_seen();
        match self.repository.readings_since(since).await {
            Ok(batch) => {
                let appended = session.merge_readings(batch);
                if appended > 0 {
                    tracing::debug!(appended, ?since, "merged new readings");
                }
                appended
            }
            Err(e) => {
                tracing::warn!(error = %e, ?since, "readings poll failed, keeping previous state");
                0
            }
        }
    }

    /// Poll on a fixed interval while the session reports logging active,
    /// invoking `on_tick` after each poll so the host can redraw. Every
    /// `status_stride` polls the logger status is re-synced, which is also
    /// how the loop learns that logging has stopped.
    pub async fn run<F>(&self, session: &mut DashboardSession, mut on_tick: F)
    where
        F: FnMut(&mut DashboardSession),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut polls_without_status = 0u32;

        loop {
            ticker.tick().await;

            if !session.is_logging() {
                tracing::info!("logging no longer active, poller stopping");
                break;
            }

            self.poll_once(session).await;

            if polls_without_status >= self.status_stride {
                if let Err(e) = session.refresh_status().await {
                    tracing::warn!(error = %e, "status re-sync failed");
                }
                polls_without_status = 0;
            } else {
                polls_without_status += 1;
            }

            on_tick(session);
        }
    }
}
