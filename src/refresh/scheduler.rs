/// Periodic refresh scheduler
///
/// Fires the coordinator on a fixed wall-clock interval. A tick that
/// lands while a manual (or previous scheduled) refresh is still running
/// is a no-op; the next tick self-corrects. The planned next run time is
/// published for the status endpoint.
use super::coordinator::{RefreshCoordinator, TriggerOutcome};
use crate::logger::{self, LogTag};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct RefreshScheduler {
    coordinator: Arc<RefreshCoordinator>,
    interval: Duration,
    next_run_at: RwLock<Option<DateTime<Utc>>>,
}

impl RefreshScheduler {
    pub fn new(coordinator: Arc<RefreshCoordinator>, interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            coordinator,
            interval,
            next_run_at: RwLock::new(None),
        })
    }

    /// Planned time of the next scheduled trigger
    pub fn next_run_at(&self) -> Option<DateTime<Utc>> {
        *self.next_run_at.read()
    }

    /// Spawn the tick loop; runs until the process exits
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        logger::info(
            LogTag::Scheduler,
            &format!("Scheduling cache refresh every {:?}", scheduler.interval),
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.interval);
            // Consume the immediate first tick; the startup refresh is
            // handled separately in main
            ticker.tick().await;

            loop {
                scheduler.publish_next_run();
                ticker.tick().await;

                match scheduler.coordinator.trigger() {
                    TriggerOutcome::Started => {
                        logger::info(LogTag::Scheduler, "Scheduled refresh triggered");
                    }
                    TriggerOutcome::AlreadyInProgress => {
                        logger::debug(
                            LogTag::Scheduler,
                            "Scheduled tick skipped: refresh already running",
                        );
                    }
                }
            }
        })
    }

    fn publish_next_run(&self) {
        let seconds = self.interval.as_secs().min(i64::MAX as u64) as i64;
        *self.next_run_at.write() = Some(Utc::now() + chrono::Duration::seconds(seconds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::errors::ScrapeError;
    use crate::scrape::{ProgressFn, ScrapeProvider};
    use crate::skins::SkinRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        runs: AtomicUsize,
    }

    #[async_trait]
    impl ScrapeProvider for CountingProvider {
        async fn scrape(&self, _progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_trigger_refreshes_on_the_interval() {
        let store = Arc::new(CacheStore::new());
        let provider = Arc::new(CountingProvider {
            runs: AtomicUsize::new(0),
        });
        let coordinator = RefreshCoordinator::new(
            store,
            Arc::clone(&provider) as Arc<dyn ScrapeProvider>,
            Duration::from_secs(60),
        );
        let scheduler = RefreshScheduler::new(coordinator, Duration::from_secs(10));
        scheduler.start();

        // Let the loop consume its immediate tick and publish the plan
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(scheduler.next_run_at().is_some());
        assert_eq!(provider.runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(provider.runs.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.runs.load(Ordering::SeqCst), 2);
    }
}
