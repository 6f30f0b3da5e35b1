//! Cache refresh subsystem
//!
//! `RefreshCoordinator` owns the process-wide refresh state machine and
//! is the only writer to the cache store; `RefreshScheduler` drives it on
//! a timer. Manual triggers from the HTTP layer and scheduled triggers go
//! through the same guard, so at most one scrape is ever in flight.

pub mod coordinator;
pub mod scheduler;

pub use coordinator::{RefreshCoordinator, TriggerOutcome};
pub use scheduler::RefreshScheduler;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Process-wide refresh state, owned solely by the coordinator
///
/// Transitions: Idle --trigger--> InProgress --success--> Idle;
/// InProgress --failure--> Failed; Failed --trigger--> InProgress.
/// There is no InProgress -> InProgress transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RefreshState {
    Idle,
    InProgress {
        started_at: DateTime<Utc>,
        items_done: usize,
        items_total_estimate: usize,
    },
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

impl RefreshState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RefreshState::InProgress { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RefreshState::Failed { .. })
    }
}
