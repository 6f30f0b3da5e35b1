/// Shared application state for the webserver
///
/// References to the core subsystems that route handlers need. Handlers
/// only ever read through the query service or call the coordinator's
/// non-blocking entry points, so no handler holds a lock across I/O.
use crate::query::QueryService;
use crate::refresh::{RefreshCoordinator, RefreshScheduler};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
    pub coordinator: Arc<RefreshCoordinator>,
    pub scheduler: Arc<RefreshScheduler>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        query: QueryService,
        coordinator: Arc<RefreshCoordinator>,
        scheduler: Arc<RefreshScheduler>,
    ) -> Self {
        Self {
            query,
            coordinator,
            scheduler,
            startup_time: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
