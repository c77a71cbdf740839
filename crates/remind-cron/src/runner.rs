//! The polling loop that drives a [`DailySchedule`].

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::schedule::DailySchedule;

/// Run `job` once a day at the scheduled time, polling every
/// `poll_interval`, until `cancel` fires.
///
/// A missed fire time (process asleep, clock jump) runs the job once on
/// the next poll; the following occurrence is computed from "now", so
/// there is no backfill.
pub async fn run_daily<F, Fut>(
    schedule: DailySchedule,
    poll_interval: Duration,
    cancel: CancellationToken,
    job: F,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    run_with_clock(schedule, poll_interval, cancel, job, || {
        Local::now().naive_local()
    })
    .await;
}

/// Same loop with an injected clock, so tests control the passage of time.
async fn run_with_clock<F, Fut, C>(
    schedule: DailySchedule,
    poll_interval: Duration,
    cancel: CancellationToken,
    job: F,
    clock: C,
) where
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
    C: Fn() -> NaiveDateTime,
{
    let mut next = schedule.next_run(clock());
    info!(
        hour = schedule.hour,
        minute = schedule.minute,
        next_run = %next,
        poll_secs = poll_interval.as_secs(),
        "notification scheduler started"
    );

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!("notification scheduler stopped");
                return;
            }
            () = tokio::time::sleep(poll_interval) => {
                let now = clock();
                if now >= next {
                    info!(fired_at = %now, "running scheduled job");
                    job().await;
                    next = schedule.next_run(clock());
                    info!(next_run = %next, "next run scheduled");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::NaiveDate;

    fn at(h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[tokio::test]
    async fn fires_once_when_clock_passes_fire_time() {
        let schedule = DailySchedule::new(8, 0);
        let cancel = CancellationToken::new();
        let count = Arc::new(AtomicUsize::new(0));
        let clock_value = Arc::new(Mutex::new(at(7, 59, 0)));

        let runner = {
            let cancel = cancel.clone();
            let count = count.clone();
            let clock_value = clock_value.clone();
            tokio::spawn(async move {
                run_with_clock(
                    schedule,
                    Duration::from_millis(5),
                    cancel,
                    move || {
                        let count = count.clone();
                        async move {
                            let _ = count.fetch_add(1, Ordering::SeqCst);
                        }
                    },
                    move || *clock_value.lock().unwrap(),
                )
                .await;
            })
        };

        // Still before the fire time — nothing runs
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Cross the fire time — exactly one run, then next is tomorrow
        *clock_value.lock().unwrap() = at(8, 0, 30);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        cancel.cancel();
        runner.await.unwrap();
    }

    #[tokio::test]
    async fn does_not_fire_before_schedule() {
        let schedule = DailySchedule::new(23, 59);
        let cancel = CancellationToken::new();
        let count = Arc::new(AtomicUsize::new(0));

        let runner = {
            let cancel = cancel.clone();
            let count = count.clone();
            tokio::spawn(async move {
                run_with_clock(
                    schedule,
                    Duration::from_millis(5),
                    cancel,
                    move || {
                        let count = count.clone();
                        async move {
                            let _ = count.fetch_add(1, Ordering::SeqCst);
                        }
                    },
                    || at(0, 0, 0),
                )
                .await;
            })
        };

        tokio::time::sleep(Duration::from_millis(40)).await;
        cancel.cancel();
        runner.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancellation_stops_the_loop_promptly() {
        let schedule = DailySchedule::new(8, 0);
        let cancel = CancellationToken::new();

        let runner = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                run_with_clock(
                    schedule,
                    Duration::from_secs(60),
                    cancel,
                    || async {},
                    || at(0, 0, 0),
                )
                .await;
            })
        };

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), runner)
            .await
            .expect("runner should stop on cancellation")
            .unwrap();
    }
}
