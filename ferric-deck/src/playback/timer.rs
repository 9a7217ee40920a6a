//! Cancellable scheduled callbacks.
//!
//! The engine owns two recurring timers (overheat decay tick, cooldown
//! expiry). Both are held as [`TimerHandle`]s so `load()` and `cleanup()` can
//! deterministically guarantee no stale timer from a previous session
//! mutates the state of a later one: dropping or cancelling a handle aborts
//! the underlying task.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration};

/// Owned handle to a scheduled task; aborts the task on drop.
#[derive(Debug)]
pub(crate) struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stop the timer. Idempotent.
    pub(crate) fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `tick` every `period`, starting one period from now.
pub(crate) fn spawn_repeating<F, Fut>(period: Duration, mut tick: F) -> TimerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        // the first interval tick resolves immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            tick().await;
        }
    });
    TimerHandle { task }
}

/// Run `action` once after `delay`.
pub(crate) fn spawn_after<Fut>(delay: Duration, action: Fut) -> TimerHandle
where
    Fut: Future<Output = ()> + Send + 'static,
{
    let task = tokio::spawn(async move {
        sleep(delay).await;
        action.await;
    });
    TimerHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn repeating_timer_fires_every_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let _timer = spawn_repeating(Duration::from_millis(100), move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stops_firing() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let timer = spawn_repeating(Duration::from_millis(100), move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        tokio::task::yield_now().await;
        timer.cancel();
        timer.cancel(); // idempotent
        tokio::time::sleep(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_once_after_delay() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let _timer = spawn_after(Duration::from_millis(200), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(150)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_aborts_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let timer = spawn_after(Duration::from_millis(100), async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        drop(timer);

        tokio::time::sleep(Duration::from_millis(300)).await;
        tokio::task::yield_now().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
