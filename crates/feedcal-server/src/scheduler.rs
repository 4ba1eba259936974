//! Daily scheduler for feed refreshes.
//!
//! The job runs once a day at a fixed wall-clock time in the configured zone
//! and optionally once at startup. A failed run is logged and recorded; the
//! next run happens at the next scheduled time as usual. There is no backoff
//! or in-process retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, Utc};
use feedcal_core::{Tz, resolve_lenient, today_in};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::config::ScheduleSettings;

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Zone `run_at` is read in.
    pub zone: Tz,
    /// Local time of the daily run.
    pub run_at: NaiveTime,
    /// Whether to run once immediately at startup.
    pub run_on_startup: bool,
}

impl SchedulerConfig {
    /// Creates a config for a daily run at `run_at` in `zone`.
    pub fn new(zone: Tz, run_at: NaiveTime) -> Self {
        Self {
            zone,
            run_at,
            run_on_startup: false,
        }
    }

    /// Creates a config from the `[schedule]` settings.
    pub fn from_settings(zone: Tz, schedule: &ScheduleSettings) -> Self {
        Self::new(zone, schedule.run_at).with_run_on_startup(schedule.run_on_startup)
    }

    /// Builder: run once at startup.
    pub fn with_run_on_startup(mut self, run_on_startup: bool) -> Self {
        self.run_on_startup = run_on_startup;
        self
    }

    /// Returns the next run strictly after `now`.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        next_run_after(now, &self.zone, self.run_at)
    }
}

/// Returns the first instant strictly after `now` at which the local clock
/// in `zone` reads `run_at`.
///
/// If `run_at` falls in a DST gap on some day, that day's run happens at the
/// end of the gap.
pub fn next_run_after(now: DateTime<Utc>, zone: &Tz, run_at: NaiveTime) -> DateTime<Utc> {
    let mut date = today_in(now, zone);
    // today, tomorrow and one spare day
    for _ in 0..3 {
        let candidate = resolve_lenient(date.and_time(run_at), zone);
        if candidate > now {
            return candidate;
        }
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    now + chrono::Duration::days(1)
}

/// Commands that can be sent to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Run the job immediately; the daily schedule is unchanged.
    RunNow,
    /// Stop the scheduler.
    Stop,
}

/// Scheduler state.
#[derive(Debug, Clone, Default)]
pub struct SchedulerState {
    /// Number of completed runs, successful or not.
    pub runs: u64,
    /// Number of failed runs.
    pub failures: u64,
    /// Last successful run.
    pub last_success: Option<DateTime<Utc>>,
    /// Last run attempt.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error of the last run, cleared on success.
    pub last_error: Option<String>,
    /// Next scheduled run.
    pub next_run: Option<DateTime<Utc>>,
}

impl SchedulerState {
    /// Records a successful run.
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.runs += 1;
        self.last_success = Some(at);
        self.last_attempt = Some(at);
        self.last_error = None;
    }

    /// Records a failed run.
    pub fn record_failure(&mut self, at: DateTime<Utc>, error: impl Into<String>) {
        self.runs += 1;
        self.failures += 1;
        self.last_attempt = Some(at);
        self.last_error = Some(error.into());
    }
}

/// Shared scheduler state.
pub type SharedSchedulerState = Arc<RwLock<SchedulerState>>;

/// Runs a job once a day.
pub struct Scheduler {
    config: SchedulerConfig,
    state: SharedSchedulerState,
    command_tx: mpsc::Sender<SchedulerCommand>,
    command_rx: mpsc::Receiver<SchedulerCommand>,
}

impl Scheduler {
    /// Creates a new scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        Self {
            config,
            state: Arc::new(RwLock::new(SchedulerState::default())),
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for sending commands to the scheduler.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            command_tx: self.command_tx.clone(),
            state: self.state.clone(),
        }
    }

    /// Runs the scheduler loop until `shutdown` completes or a `Stop` command
    /// arrives.
    ///
    /// The job returns `Ok(())` on success or an error message on failure.
    pub async fn run<F, Fut, S>(mut self, job: F, shutdown: S)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<(), String>>,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            zone = self.config.zone.name(),
            run_at = %self.config.run_at,
            run_on_startup = self.config.run_on_startup,
            "Scheduler started"
        );

        if self.config.run_on_startup {
            self.run_job(&job).await;
        }

        loop {
            let next = self.config.next_run_after(Utc::now());
            self.state.write().await.next_run = Some(next);
            let delay = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            info!(next_run = %next, delay_secs = delay.as_secs(), "Next run scheduled");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    self.run_job(&job).await;
                }
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(SchedulerCommand::RunNow) => {
                            debug!("Received RunNow command");
                            self.run_job(&job).await;
                        }
                        Some(SchedulerCommand::Stop) | None => {
                            info!("Scheduler stopping");
                            break;
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutdown requested, scheduler stopping");
                    break;
                }
            }
        }
    }

    async fn run_job<F, Fut>(&self, job: &F)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<(), String>>,
    {
        debug!("Starting run");
        let result = job().await;
        let at = Utc::now();
        match result {
            Ok(()) => {
                info!("Run succeeded");
                self.state.write().await.record_success(at);
            }
            Err(e) => {
                warn!(error = %e, "Run failed, keeping previous feed");
                self.state.write().await.record_failure(at, e);
            }
        }
    }
}

/// Handle for sending commands to a running scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    command_tx: mpsc::Sender<SchedulerCommand>,
    state: SharedSchedulerState,
}

impl SchedulerHandle {
    /// Triggers an immediate run.
    pub async fn run_now(&self) -> Result<(), mpsc::error::SendError<SchedulerCommand>> {
        self.command_tx.send(SchedulerCommand::RunNow).await
    }

    /// Stops the scheduler.
    pub async fn stop(&self) -> Result<(), mpsc::error::SendError<SchedulerCommand>> {
        self.command_tx.send(SchedulerCommand::Stop).await
    }

    /// Returns a snapshot of the scheduler state.
    pub async fn state(&self) -> SchedulerState {
        self.state.read().await.clone()
    }
}
