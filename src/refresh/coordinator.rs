/// Refresh coordinator: drives the scrape-and-commit cycle
///
/// All mutation of the refresh state and the committed snapshot funnels
/// through this type. A trigger transitions the state machine and spawns
/// the scrape as a background task, so callers (HTTP handlers, the
/// scheduler) never block on network I/O. The whole scrape is bounded by
/// a timeout; a timeout or scrape error lands in Failed and leaves the
/// previous snapshot serving reads.
use super::RefreshState;
use crate::cache::CacheStore;
use crate::errors::ScrapeError;
use crate::logger::{self, LogTag};
use crate::scrape::ScrapeProvider;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Result of a trigger attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A scrape task was started
    Started,
    /// A scrape is already running; no second one was started
    AlreadyInProgress,
}

pub struct RefreshCoordinator {
    store: Arc<CacheStore>,
    provider: Arc<dyn ScrapeProvider>,
    scrape_timeout: Duration,
    state: RwLock<RefreshState>,
    last_success: RwLock<Option<DateTime<Utc>>>,
}

impl RefreshCoordinator {
    pub fn new(
        store: Arc<CacheStore>,
        provider: Arc<dyn ScrapeProvider>,
        scrape_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            provider,
            scrape_timeout,
            state: RwLock::new(RefreshState::Idle),
            last_success: RwLock::new(None),
        })
    }

    /// Start a refresh unless one is already running
    ///
    /// Returns immediately; the scrape runs as a spawned task. Must be
    /// called from within a tokio runtime.
    pub fn trigger(self: &Arc<Self>) -> TriggerOutcome {
        {
            let mut state = self.state.write();
            if state.is_in_progress() {
                logger::debug(
                    LogTag::Refresh,
                    "Trigger ignored: refresh already in progress",
                );
                return TriggerOutcome::AlreadyInProgress;
            }
            *state = RefreshState::InProgress {
                started_at: Utc::now(),
                items_done: 0,
                items_total_estimate: 0,
            };
        }

        logger::info(LogTag::Refresh, "Refresh started");
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            coordinator.run_refresh().await;
        });

        TriggerOutcome::Started
    }

    /// Read-only view of the current refresh state, non-blocking
    pub fn status(&self) -> RefreshState {
        self.state.read().clone()
    }

    /// Completion time of the most recent successful refresh
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.last_success.read()
    }

    async fn run_refresh(self: Arc<Self>) {
        let progress_handle = Arc::clone(&self);
        let progress = move |done: usize, total: usize| {
            progress_handle.report_progress(done, total);
        };

        let outcome =
            tokio::time::timeout(self.scrape_timeout, self.provider.scrape(&progress)).await;

        match outcome {
            Ok(Ok(records)) => self.on_success(records),
            Ok(Err(e)) => self.on_failure(e.to_string()),
            Err(_) => self.on_failure(ScrapeError::Timeout(self.scrape_timeout).to_string()),
        }
    }

    /// Update in-progress counters; items_done never decreases within one
    /// refresh cycle
    fn report_progress(&self, done: usize, total: usize) {
        let mut state = self.state.write();
        if let RefreshState::InProgress {
            items_done,
            items_total_estimate,
            ..
        } = &mut *state
        {
            *items_done = (*items_done).max(done);
            *items_total_estimate = total;
        }
    }

    /// Single commit point: only a complete record set ever reaches the
    /// store
    fn on_success(&self, records: Vec<crate::skins::SkinRecord>) {
        let snapshot = self.store.commit(records);
        *self.state.write() = RefreshState::Idle;
        *self.last_success.write() = Some(Utc::now());
        logger::info(
            LogTag::Refresh,
            &format!(
                "Refresh completed: {} records (generation {})",
                snapshot.len(),
                snapshot.generation()
            ),
        );
    }

    /// Record the failure; the committed snapshot is left untouched so
    /// stale-but-valid data keeps serving
    fn on_failure(&self, error: String) {
        logger::error(LogTag::Refresh, &format!("Refresh failed: {}", error));
        *self.state.write() = RefreshState::Failed {
            error,
            failed_at: Utc::now(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ProgressFn;
    use crate::skins::SkinRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn record(character: &str, id: u64, name: &str) -> SkinRecord {
        SkinRecord {
            character_name: character.to_string(),
            source_url: String::new(),
            skin_id: id,
            skin_name: name.to_string(),
            is_recolor: false,
        }
    }

    /// Provider that parks until released, counting how many scrapes ran
    struct BlockingProvider {
        release: Notify,
        runs: AtomicUsize,
        records: Vec<SkinRecord>,
    }

    impl BlockingProvider {
        fn new(records: Vec<SkinRecord>) -> Arc<Self> {
            Arc::new(Self {
                release: Notify::new(),
                runs: AtomicUsize::new(0),
                records,
            })
        }
    }

    #[async_trait]
    impl ScrapeProvider for BlockingProvider {
        async fn scrape(&self, progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            progress(0, 2);
            self.release.notified().await;
            progress(2, 2);
            Ok(self.records.clone())
        }
    }

    /// Provider that fails on the first run and succeeds afterwards
    struct FlakyProvider {
        attempts: AtomicUsize,
        records: Vec<SkinRecord>,
    }

    #[async_trait]
    impl ScrapeProvider for FlakyProvider {
        async fn scrape(&self, progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError> {
            progress(0, 1);
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(ScrapeError::Layout {
                    url: "https://wiki.example/Heroes".to_string(),
                    reason: "no hero links found on index page".to_string(),
                });
            }
            progress(1, 1);
            Ok(self.records.clone())
        }
    }

    /// Provider that reports a regressing progress value, then parks
    struct RegressingProvider {
        release: Notify,
    }

    #[async_trait]
    impl ScrapeProvider for RegressingProvider {
        async fn scrape(&self, progress: &ProgressFn) -> Result<Vec<SkinRecord>, ScrapeError> {
            progress(5, 10);
            progress(3, 10);
            self.release.notified().await;
            Ok(Vec::new())
        }
    }

    async fn wait_until<F: Fn() -> bool>(condition: F) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached within 1s");
    }

    #[tokio::test]
    async fn refresh_cycle_populates_empty_cache() {
        let store = Arc::new(CacheStore::new());
        let provider = BlockingProvider::new(vec![
            record("Magik", 1016001, "Default"),
            record("Magik", 1016200, "Punk Rebel"),
        ]);
        let coordinator = RefreshCoordinator::new(
            Arc::clone(&store),
            provider.clone(),
            Duration::from_secs(5),
        );

        assert_eq!(coordinator.status(), RefreshState::Idle);
        assert!(store.current().is_empty());

        assert_eq!(coordinator.trigger(), TriggerOutcome::Started);
        wait_until(|| coordinator.status().is_in_progress()).await;

        provider.release.notify_one();
        wait_until(|| coordinator.status() == RefreshState::Idle).await;

        let snapshot = store.current();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.is_populated());
        assert!(coordinator.last_success().is_some());
    }

    #[tokio::test]
    async fn second_trigger_is_rejected_while_running() {
        let store = Arc::new(CacheStore::new());
        let provider = BlockingProvider::new(Vec::new());
        let coordinator = RefreshCoordinator::new(
            Arc::clone(&store),
            provider.clone(),
            Duration::from_secs(5),
        );

        assert_eq!(coordinator.trigger(), TriggerOutcome::Started);
        wait_until(|| coordinator.status().is_in_progress()).await;
        assert_eq!(coordinator.trigger(), TriggerOutcome::AlreadyInProgress);

        provider.release.notify_one();
        wait_until(|| coordinator.status() == RefreshState::Idle).await;

        // Only one scrape ever ran
        assert_eq!(provider.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_preserves_snapshot_and_retry_recovers() {
        let store = Arc::new(CacheStore::new());
        store.commit(vec![record("Magik", 1016001, "Old")]);

        let provider = Arc::new(FlakyProvider {
            attempts: AtomicUsize::new(0),
            records: vec![record("Magik", 1016200, "New")],
        });
        let coordinator =
            RefreshCoordinator::new(Arc::clone(&store), provider, Duration::from_secs(5));

        coordinator.trigger();
        wait_until(|| coordinator.status().is_failed()).await;

        // Stale-but-valid data still serves
        let snapshot = store.current();
        assert_eq!(snapshot.records()[0].skin_name, "Old");
        assert!(coordinator.last_success().is_none());
        match coordinator.status() {
            RefreshState::Failed { error, .. } => {
                assert!(error.contains("no hero links"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        // Failed -> InProgress -> Idle on retry
        assert_eq!(coordinator.trigger(), TriggerOutcome::Started);
        wait_until(|| coordinator.status() == RefreshState::Idle).await;
        assert_eq!(store.current().records()[0].skin_name, "New");
        assert!(coordinator.last_success().is_some());
    }

    #[tokio::test]
    async fn progress_counters_never_decrease() {
        let store = Arc::new(CacheStore::new());
        let provider = Arc::new(RegressingProvider {
            release: Notify::new(),
        });
        let coordinator = RefreshCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&provider) as Arc<dyn ScrapeProvider>,
            Duration::from_secs(5),
        );

        coordinator.trigger();
        wait_until(|| {
            matches!(
                coordinator.status(),
                RefreshState::InProgress { items_done, .. } if items_done > 0
            )
        })
        .await;

        match coordinator.status() {
            RefreshState::InProgress {
                items_done,
                items_total_estimate,
                ..
            } => {
                assert_eq!(items_done, 5);
                assert_eq!(items_total_estimate, 10);
            }
            other => panic!("expected InProgress, got {:?}", other),
        }

        provider.release.notify_one();
        wait_until(|| coordinator.status() == RefreshState::Idle).await;
    }

    #[tokio::test]
    async fn slow_scrape_is_failed_with_timeout() {
        let store = Arc::new(CacheStore::new());
        let provider = BlockingProvider::new(Vec::new());
        let coordinator = RefreshCoordinator::new(
            Arc::clone(&store),
            provider.clone(),
            Duration::from_millis(50),
        );

        coordinator.trigger();
        wait_until(|| coordinator.status().is_failed()).await;

        match coordinator.status() {
            RefreshState::Failed { error, .. } => assert!(error.contains("timed out")),
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(!store.current().is_populated());
    }
}
