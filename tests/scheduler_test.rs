use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use spotdiscover::error::SyncError;
use spotdiscover::management::{JobState, SyncReport, schedule_refresh};

fn ok_report() -> Result<SyncReport, SyncError> {
    Ok(SyncReport {
        added: 30,
        removed: 30,
    })
}

#[tokio::test(start_paused = true)]
async fn test_ticks_fire_on_the_interval() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    let mut handle = schedule_refresh(Duration::from_secs(60), move || {
        let count = Arc::clone(&job_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
            ok_report()
        }
    });

    // Two full intervals pass; the immediate tick at t=0 is swallowed.
    tokio::time::sleep(Duration::from_secs(150)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(handle.state(), JobState::Scheduled);

    handle.cancel();
    handle.stopped().await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_fires_are_suppressed() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    // A tick takes 35s against a 10s interval: fires while Running are
    // skipped, so only one reconcile happens per overlap window.
    let mut handle = schedule_refresh(Duration::from_secs(10), move || {
        let count = Arc::clone(&job_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(35)).await;
            ok_report()
        }
    });

    // First run spans t=10..45; the fires at 20/30/40 are suppressed and
    // coalesce into a single second run when the first finishes.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(handle.state(), JobState::Running);

    handle.cancel();
    handle.stopped().await;
    assert_eq!(handle.state(), JobState::Cancelled);
    // The in-flight run finished; no further runs started after cancel.
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_target_not_found_cancels_the_job() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    let handle = schedule_refresh(Duration::from_secs(5), move || {
        let count = Arc::clone(&job_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
            Err(SyncError::TargetNotFound("SpotDiscover".to_string()))
        }
    });

    tokio::time::sleep(Duration::from_secs(30)).await;

    // Terminal after the first tick: no reschedule, no further runs.
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(handle.state(), JobState::Cancelled);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_auth_expired_cancels_the_job() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    let handle = schedule_refresh(Duration::from_secs(5), move || {
        let count = Arc::clone(&job_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
            Err(SyncError::AuthExpired)
        }
    });

    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(handle.state(), JobState::Cancelled);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_transient_error_returns_to_scheduled() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    // First tick fails with a transient error, later ticks succeed.
    let mut handle = schedule_refresh(Duration::from_secs(10), move || {
        let count = Arc::clone(&job_count);
        async move {
            if count.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SyncError::Io(std::io::Error::other("connection reset")))
            } else {
                ok_report()
            }
        }
    });

    tokio::time::sleep(Duration::from_secs(25)).await;

    // The failed tick did not kill the job; the next interval ran again.
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(handle.state(), JobState::Scheduled);
    assert!(!handle.is_finished());

    handle.cancel();
    handle.stopped().await;
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_first_fire() {
    let count = Arc::new(AtomicUsize::new(0));
    let job_count = Arc::clone(&count);

    let mut handle = schedule_refresh(Duration::from_secs(3600), move || {
        let count = Arc::clone(&job_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
            ok_report()
        }
    });

    handle.cancel();
    handle.stopped().await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(handle.state(), JobState::Cancelled);
}
