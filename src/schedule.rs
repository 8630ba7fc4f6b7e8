//! Running a job once a day at a fixed local wall-clock time

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Source of the current local time.  Swapped out in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// Today at the scheduled time, or tomorrow if that is not still ahead of `now`.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.at);
        if now >= today {
            today + Duration::days(1)
        } else {
            today
        }
    }

    /// Call `job` with the scheduled time of each run until `cancel` fires.
    ///
    /// The next run is recomputed from the clock after every job, so a slow job or a suspended
    /// process never shifts later runs off the scheduled time.  Sleeping is monotonic while the
    /// local clock may step back (DST, NTP), so the wait is re-checked against the clock and a
    /// scheduled time never runs twice.
    pub async fn run<C, F, Fut>(&self, clock: &C, cancel: CancellationToken, mut job: F)
    where
        C: Clock + ?Sized,
        F: FnMut(NaiveDateTime) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut last_run: Option<NaiveDateTime> = None;

        loop {
            let mut next = self.next_after(clock.now());
            if let Some(last) = last_run.filter(|last| next <= *last) {
                next = self.next_after(last);
            }

            loop {
                // Negative once the clock has reached `next`
                let wait = (next - clock.now()).to_std().unwrap_or_default();
                if wait.is_zero() {
                    break;
                }

                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(wait) => {}
                }
            }

            job(next).await;
            last_run = Some(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Local time that moves with tokio's (pausable) clock
    struct TestClock {
        base: NaiveDateTime,
        start: tokio::time::Instant,
        /// Once the clock would read the first value, it is set back by the second
        step_back: Option<(NaiveDateTime, Duration)>,
    }

    impl TestClock {
        fn starting_at(base: NaiveDateTime) -> Self {
            Self {
                base,
                start: tokio::time::Instant::now(),
                step_back: None,
            }
        }

        fn stepping_back(mut self, at: NaiveDateTime, by: Duration) -> Self {
            self.step_back = Some((at, by));
            self
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> NaiveDateTime {
            let elapsed = tokio::time::Instant::now() - self.start;
            let now = self.base + Duration::from_std(elapsed).unwrap();
            match self.step_back {
                Some((at, by)) if now >= at => now - by,
                _ => now,
            }
        }
    }

    /// Runs the schedule against `clock` for `hours` of paused time and returns every run.  Each
    /// job takes `job_minutes` to finish.
    async fn runs_over(clock: TestClock, hours: u64, job_minutes: u64) -> Vec<NaiveDateTime> {
        let cancel = CancellationToken::new();
        let fired = Arc::new(Mutex::new(Vec::new()));

        let task = {
            let cancel = cancel.clone();
            let fired = fired.clone();
            tokio::spawn(async move {
                schedule()
                    .run(&clock, cancel, |run_at| {
                        let fired = fired.clone();
                        async move {
                            fired.lock().await.push(run_at);
                            tokio::time::sleep(std::time::Duration::from_secs(job_minutes * 60))
                                .await;
                        }
                    })
                    .await
            })
        };

        tokio::time::sleep(std::time::Duration::from_secs(hours * 60 * 60)).await;
        cancel.cancel();
        task.await.unwrap();

        let fired = fired.lock().await.clone();
        fired
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn schedule() -> DailySchedule {
        DailySchedule::new(NaiveTime::from_hms_opt(0, 17, 0).unwrap())
    }

    #[test]
    fn next_run_later_today() {
        assert_eq!(schedule().next_after(at(1, 0, 5)), at(1, 0, 17));
    }

    #[test]
    fn next_run_tomorrow_once_passed() {
        assert_eq!(schedule().next_after(at(1, 12, 0)), at(2, 0, 17));
        assert_eq!(schedule().next_after(at(1, 0, 17)), at(2, 0, 17));
    }

    #[test]
    fn next_run_across_month_end() {
        let last = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        assert_eq!(schedule().next_after(last), at(1, 0, 17));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_day() {
        // Three and a half simulated days
        let fired = runs_over(TestClock::starting_at(at(1, 12, 0)), 84, 0).await;
        assert_eq!(fired, [at(2, 0, 17), at(3, 0, 17), at(4, 0, 17)]);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_set_back_before_run_still_fires_once_on_time() {
        // Local time reads an hour behind from 02:00 on, like a DST fall-back
        let clock = TestClock::starting_at(at(1, 0, 20))
            .stepping_back(at(1, 2, 0), Duration::hours(1));
        let fired = runs_over(clock, 30, 0).await;
        assert_eq!(fired, [at(2, 0, 17)]);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_set_back_during_run_does_not_repeat_it() {
        // While the 00:17 job is still busy the clock jumps back to the previous evening
        let clock = TestClock::starting_at(at(1, 0, 20))
            .stepping_back(at(2, 0, 30), Duration::hours(1));
        let fired = runs_over(clock, 30, 20).await;
        assert_eq!(fired, [at(2, 0, 17)]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_before_first_run() {
        let clock = TestClock::starting_at(at(1, 12, 0));
        let cancel = CancellationToken::new();
        let fired = Arc::new(Mutex::new(0));

        cancel.cancel();
        schedule()
            .run(&clock, cancel, |_| {
                let fired = fired.clone();
                async move { *fired.lock().await += 1 }
            })
            .await;

        assert_eq!(*fired.lock().await, 0);
    }
}
