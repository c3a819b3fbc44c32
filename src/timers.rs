//! One-shot deferred tasks for the UI thread
//!
//! The event loop waits for input with a timeout equal to the time left
//! until the earliest task, then drains everything that has come due.
//! Tasks carry their own data; nothing is ever cancelled.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Timer<T> {
    due: Instant,
    /// Tie-breaker so tasks due at the same instant fire in schedule order
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        TimerQueue {
            timers: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has passed since `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due: now + delay,
            seq,
            task,
        });
    }

    /// Time left until the earliest task is due (zero if already overdue)
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.due)
            .min()
            .map(|due| due.saturating_duration_since(now))
    }

    /// Remove and return every task due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.due, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_fire_in_due_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(500), "restore");
        queue.schedule(start, Duration::from_millis(50), "scroll");
        queue.schedule(start, Duration::from_millis(500), "restore again");

        assert_eq!(queue.timeout(start), Some(Duration::from_millis(50)));
        assert!(queue.take_due(start).is_empty());

        assert_eq!(queue.take_due(start + Duration::from_millis(60)), vec!["scroll"]);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.timeout(start + Duration::from_millis(60)),
            Some(Duration::from_millis(440))
        );

        assert_eq!(
            queue.take_due(start + Duration::from_secs(1)),
            vec!["restore", "restore again"]
        );
        assert!(queue.is_empty());
        assert_eq!(queue.timeout(start), None);
    }

    #[test]
    fn test_overdue_timeout_is_zero() {
        let start = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(start, Duration::from_millis(10), ());
        assert_eq!(
            queue.timeout(start + Duration::from_millis(30)),
            Some(Duration::ZERO)
        );
    }
}
