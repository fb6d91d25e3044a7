//! # Sales Poll Scheduler
//!
//! Background task that pulls POS sales on a fixed cadence.
//!
//! ## Tick Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   sleep(delay) ◄──────────────────────────────────────────────┐         │
//! │       │                                                       │         │
//! │       ▼                                                       │         │
//! │   connected? ──no──► test_connection() ──fail──► failure ─────┤         │
//! │       │ yes                   │ ok                            │         │
//! │       ▼                       ▼                               │         │
//! │   sync_sales_from_pos() ──ok──► delay = interval, reset ──────┤         │
//! │       │ err                                                   │         │
//! │       └──► delay = interval + backoff (doubling, jittered, ───┘         │
//! │                                        capped at max_backoff)           │
//! │                                                                         │
//! │   shutdown ──► breaks out of the sleep or drops the in-flight pull      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bridge::{ConnectionStatus, PosBridge};
use crate::config::ScheduleSettings;

/// Controls a running [`PollScheduler`].
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the loop and waits for it to exit. A pull in flight is dropped.
    pub async fn shutdown(self) {
        // The task may already be gone; nothing to signal then.
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            warn!(error = %e, "POS scheduler task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct PollScheduler {
    bridge: Arc<PosBridge>,
    settings: ScheduleSettings,
    shutdown_rx: mpsc::Receiver<()>,
}

impl PollScheduler {
    /// Spawns the loop on the current runtime. The first pull happens one
    /// interval from now.
    pub fn spawn(bridge: Arc<PosBridge>, settings: ScheduleSettings) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let scheduler = PollScheduler {
            bridge,
            settings,
            shutdown_rx,
        };
        let task = tokio::spawn(scheduler.run());
        SchedulerHandle { shutdown_tx, task }
    }

    async fn run(mut self) {
        let interval = self.settings.poll_interval();
        info!(?interval, "POS scheduler starting");

        let mut backoff = self.create_backoff();
        let mut delay = interval;
        let mut failures = 0u32;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.shutdown_rx.recv() => {
                    info!("POS scheduler received shutdown signal");
                    break;
                }
            }

            let succeeded = tokio::select! {
                ok = Self::tick(&self.bridge) => ok,
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown during POS pull");
                    break;
                }
            };

            if succeeded {
                if failures > 0 {
                    info!(failures, "POS pull recovered");
                }
                failures = 0;
                backoff.reset();
                delay = interval;
            } else {
                failures += 1;
                let extra = backoff.next_backoff().unwrap_or(self.settings.max_backoff());
                delay = interval.saturating_add(extra);
                debug!(
                    ?delay,
                    nominal = ?nominal_delay(&self.settings, failures),
                    failures,
                    "Backing off before next POS pull"
                );
            }
        }

        info!("POS scheduler stopped");
    }

    /// One scheduled pull. Returns false on any failure.
    async fn tick(bridge: &PosBridge) -> bool {
        if bridge.connection_status().await != ConnectionStatus::Connected
            && !bridge.test_connection().await
        {
            debug!("POS offline, skipping tick");
            return false;
        }

        match bridge.sync_sales_from_pos().await {
            Ok(report) => {
                debug!(sales = report.sales, "Scheduled POS pull done");
                true
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Scheduled POS pull failed");
                false
            }
        }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        let mut backoff = ExponentialBackoff {
            initial_interval: self.settings.initial_backoff(),
            max_interval: self.settings.max_backoff(),
            randomization_factor: self.settings.jitter,
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };
        backoff.reset();
        backoff
    }
}

/// Delay before the next tick after `failures` consecutive failures,
/// ignoring jitter.
pub fn nominal_delay(settings: &ScheduleSettings, failures: u32) -> Duration {
    if failures == 0 {
        return settings.poll_interval();
    }
    let factor = 2u32.saturating_pow(failures - 1);
    let extra = settings
        .initial_backoff()
        .saturating_mul(factor)
        .min(settings.max_backoff());
    settings.poll_interval().saturating_add(extra)
}
