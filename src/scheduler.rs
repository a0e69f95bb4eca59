//! Reminder scheduler
//!
//! Background task that runs a reminder evaluation pass at a fixed
//! interval. Exactly-once delivery does not depend on the tick cadence;
//! it is enforced by the claim rows, so a slow or missed tick only delays
//! reminders, never duplicates them.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::watch;
use tracing::{error, info};

use crate::services::{Notifier, ReminderService};

/// Periodic reminder evaluation task
pub struct ReminderScheduler {
    pool: PgPool,
    notifier: Arc<dyn Notifier>,
    tick_interval: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl ReminderScheduler {
    pub fn new(
        pool: PgPool,
        notifier: Arc<dyn Notifier>,
        tick_interval_seconds: u64,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pool,
            notifier,
            tick_interval: Duration::from_secs(tick_interval_seconds),
            shutdown_rx,
        }
    }

    /// Run until the shutdown signal flips
    pub async fn run(mut self) {
        info!(
            interval_seconds = self.tick_interval.as_secs(),
            "Reminder scheduler started"
        );

        let mut interval = tokio::time::interval(self.tick_interval);
        // The first tick of tokio's interval completes immediately, which
        // doubles as a catch-up pass after restarts
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("Reminder scheduler received shutdown signal");
                        break;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) =
                        ReminderService::run_tick(&self.pool, self.notifier.as_ref(), Utc::now()).await
                    {
                        error!(error = %e, "Reminder pass failed");
                    }
                }
            }
        }

        info!("Reminder scheduler shutdown complete");
    }
}
