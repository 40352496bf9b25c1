//! Deferred actions on a virtual clock.
//!
//! Time is whatever the owner says it is: the game loop feeds elapsed wall time,
//! tests jump straight to the instant they care about.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled<A> {
    pub fire_at: Duration,
    pub action: A,
}

#[derive(Debug)]
pub struct Timeline<A> {
    pending: Vec<Scheduled<A>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> Timeline<A> {
    pub fn schedule(&mut self, fire_at: Duration, action: A) {
        // Stable insert keeps same-instant actions in scheduling order.
        let idx = self.pending.partition_point(|s| s.fire_at <= fire_at);
        self.pending.insert(idx, Scheduled { fire_at, action });
    }

    /// Removes and returns the earliest action due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Scheduled<A>> {
        match self.pending.first() {
            Some(s) if s.fire_at <= now => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.first().map(|s| s.fire_at)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_time_order() {
        let mut tl = Timeline::default();
        tl.schedule(Duration::from_millis(600), "b");
        tl.schedule(Duration::from_millis(100), "a");
        tl.schedule(Duration::from_millis(600), "c");
        assert_eq!(tl.next_due(), Some(Duration::from_millis(100)));

        assert!(tl.pop_due(Duration::from_millis(99)).is_none());
        let now = Duration::from_secs(1);
        let order: Vec<_> = std::iter::from_fn(|| tl.pop_due(now))
            .map(|s| s.action)
            .collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert!(tl.is_empty());
    }
}
