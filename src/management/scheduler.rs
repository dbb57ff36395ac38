use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{Result, SyncError},
    info,
    management::SyncReport,
    success, warning,
};

/// Lifecycle of a scheduled refresh job.
///
/// `Idle` is the state before any job exists. A registered job alternates
/// between `Scheduled` (waiting for the timer) and `Running` (a reconcile
/// is in flight); `Cancelled` is terminal and the job never fires again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Scheduled,
    Running,
    Cancelled,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Running => write!(f, "Running"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Handle to a running refresh job.
///
/// Dropping the handle does not stop the job; call
/// [`cancel`](Self::cancel) for an explicit shutdown. The job also cancels
/// itself when a tick reports the target destroyed or the authorization
/// expired.
pub struct JobHandle {
    cancel: CancellationToken,
    state: Arc<Mutex<JobState>>,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn state(&self) -> JobState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Requests cancellation. Takes effect immediately while the job waits
    /// on the timer; a tick already in flight finishes first.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the job's task has exited.
    pub async fn stopped(&mut self) {
        let _ = (&mut self.task).await;
    }
}

/// Registers a recurring refresh job with a fixed-interval timer.
///
/// The tick closure performs one reconcile. Ticks never overlap: the loop
/// awaits each tick inline and missed timer fires during a long-running tick
/// are skipped, not queued, so at most one reconcile runs per job at any
/// time and a sync exceeding the interval simply coalesces into the next
/// fire.
///
/// Failure semantics per tick:
/// - `Ok` - counts are logged, the job goes back to waiting
/// - [`SyncError::TargetNotFound`] - the playlist is gone; terminal, the job
///   cancels itself (informational, not an error)
/// - [`SyncError::AuthExpired`] - unrecoverable without a new login;
///   terminal, the job cancels itself
/// - anything else - transient provider trouble, logged and retried on the
///   next interval
pub fn schedule_refresh<F, Fut>(interval: Duration, mut tick: F) -> JobHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<SyncReport>> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let state = Arc::new(Mutex::new(JobState::Scheduled));

    let task = tokio::spawn({
        let cancel = cancel.clone();
        let state = Arc::clone(&state);
        async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // An interval yields immediately on the first tick; the playlist
            // was just built, so swallow it and fire after one full period.
            ticker.tick().await;

            loop {
                tokio::select! {
                    // Cancellation wins over a timer fire that became ready
                    // while a previous tick was still in flight.
                    biased;

                    () = cancel.cancelled() => {
                        set_state(&state, JobState::Cancelled);
                        info!("Refresh job cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        set_state(&state, JobState::Running);
                        match tick().await {
                            Ok(report) => {
                                success!(
                                    "Playlist refreshed: {} added, {} removed",
                                    report.added,
                                    report.removed
                                );
                                set_state(&state, JobState::Scheduled);
                            }
                            Err(SyncError::TargetNotFound(name)) => {
                                info!("Playlist {} no longer exists; refresh job removed", name);
                                set_state(&state, JobState::Cancelled);
                                break;
                            }
                            Err(SyncError::AuthExpired) => {
                                warning!("Authorization expired; refresh job removed. Log in again.");
                                set_state(&state, JobState::Cancelled);
                                break;
                            }
                            Err(e) => {
                                warning!("Refresh failed, retrying next interval: {}", e);
                                set_state(&state, JobState::Scheduled);
                            }
                        }
                    }
                }
            }
        }
    });

    JobHandle {
        cancel,
        state,
        task,
    }
}

fn set_state(state: &Arc<Mutex<JobState>>, next: JobState) {
    let mut guard = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = next;
}
