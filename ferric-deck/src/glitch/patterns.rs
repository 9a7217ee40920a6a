//! Sliding-window history buffers for pattern detection.

use std::collections::VecDeque;
use tokio::time::{Duration, Instant};

/// Time-bounded action history.
///
/// Entries older than the window are pruned on every record, so `len()` is
/// always the count of actions within the window ending now.
#[derive(Debug)]
pub(crate) struct ActionWindow<A> {
    window: Duration,
    entries: VecDeque<(A, Instant)>,
}

impl<A: Copy + Eq> ActionWindow<A> {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            entries: VecDeque::new(),
        }
    }

    pub(crate) fn record(&mut self, action: A, now: Instant) {
        self.prune(now);
        self.entries.push_back((action, now));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// `(alternating, total)` over adjacent entry pairs; a pair alternates
    /// when the two actions differ.
    pub(crate) fn alternations(&self) -> (usize, usize) {
        let total = self.entries.len().saturating_sub(1);
        let alternating = self
            .entries
            .iter()
            .zip(self.entries.iter().skip(1))
            .filter(|((a, _), (b, _))| a != b)
            .count();
        (alternating, total)
    }

    fn prune(&mut self, now: Instant) {
        while let Some((_, t)) = self.entries.front() {
            if now.duration_since(*t) >= self.window {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_fall_out_of_the_window() {
        let mut window: ActionWindow<u8> = ActionWindow::new(Duration::from_millis(2_000));
        let start = Instant::now();
        window.record(1, start);
        window.record(2, start + Duration::from_millis(500));
        assert_eq!(window.len(), 2);

        // recording at t=2100 prunes the entry from t=0
        window.record(3, start + Duration::from_millis(2_100));
        assert_eq!(window.len(), 2);

        // the entry from t=500 is exactly window-old at t=2500: stale
        window.record(4, start + Duration::from_millis(2_500));
        assert_eq!(window.len(), 2);
        window.record(5, start + Duration::from_millis(4_500));
        assert_eq!(window.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn alternation_counting() {
        let mut window: ActionWindow<&str> = ActionWindow::new(Duration::from_millis(3_000));
        let now = Instant::now();

        for action in ["ff", "rew", "ff", "rew"] {
            window.record(action, now);
        }
        assert_eq!(window.alternations(), (3, 3));

        window.clear();
        for action in ["ff", "ff", "ff", "ff"] {
            window.record(action, now);
        }
        assert_eq!(window.alternations(), (0, 3));

        window.clear();
        assert_eq!(window.alternations(), (0, 0));
    }
}
