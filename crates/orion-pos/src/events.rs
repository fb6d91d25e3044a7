//! # Bridge Events
//!
//! The toast surface: every user-visible outcome of a POS operation is
//! pushed through a [`PosEventEmitter`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PosBridge ──► emit_status(PosStatus)      "Checking" / "Connected"     │
//! │            ──► emit_success(message)       "6 products synced to POS"   │
//! │            ──► emit_error(message, retry)  "Could not reach the POS."   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::bridge::PosStatus;

/// Receives bridge events (a UI shell, a log, a test recorder).
pub trait PosEventEmitter: Send + Sync {
    fn emit_status(&self, status: &PosStatus);

    /// One line announcing a completed operation.
    fn emit_success(&self, message: &str);

    fn emit_error(&self, message: &str, retryable: bool);
}

/// Drops every event.
pub struct NoOpEmitter;

impl PosEventEmitter for NoOpEmitter {
    fn emit_status(&self, _status: &PosStatus) {}
    fn emit_success(&self, _message: &str) {}
    fn emit_error(&self, _message: &str, _retryable: bool) {}
}

/// Writes events to the log. Used by the headless agent.
pub struct TracingEmitter;

impl PosEventEmitter for TracingEmitter {
    fn emit_status(&self, status: &PosStatus) {
        info!(
            connection = %status.connection,
            syncing = status.is_syncing,
            last_sync = ?status.last_sync,
            "POS status"
        );
    }

    fn emit_success(&self, message: &str) {
        info!("{}", message);
    }

    fn emit_error(&self, message: &str, retryable: bool) {
        warn!(retryable, "{}", message);
    }
}
