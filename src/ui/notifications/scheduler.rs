// SPDX-License-Identifier: MPL-2.0
//! Deferred task scheduling with an injectable clock.
//!
//! Auto-dismiss timers are plain data: a [`TimerQueue`] holds deadlines and
//! payloads, and the owner pops whatever is due whenever it is ticked. Time
//! comes from a [`Clock`], so tests drive a [`ManualClock`] forward instead
//! of sleeping.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, AtomicOrdering::SeqCst);
    }

    /// Sets the total time elapsed since the clock was created.
    pub fn set_elapsed(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.store(nanos, AtomicOrdering::SeqCst);
    }

    /// Returns the time elapsed since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(AtomicOrdering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

/// Identifier of a scheduled entry, unique within its queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    deadline: Instant,
    id: TimerId,
    payload: T,
}

// BinaryHeap is a max-heap; reverse the order so the earliest deadline
// (then the earliest scheduled) sits on top.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

/// Min-heap of deadlines with attached payloads.
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_id: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Entry {
            deadline,
            id,
            payload,
        });
        id
    }

    /// Removes and returns every payload whose deadline is at or before `now`.
    ///
    /// Payloads come out in deadline order; equal deadlines keep scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|entry| entry.deadline <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.payload);
            }
        }
        due
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every pending entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_millis(1500));
        assert_eq!(clock.now() - start, Duration::from_millis(1500));
        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let shared = clock.clone();
        clock.advance(Duration::from_secs(2));
        assert_eq!(shared.elapsed(), Duration::from_secs(2));

        shared.set_elapsed(Duration::from_secs(10));
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn pop_due_returns_nothing_before_deadline() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        queue.schedule(clock.now() + Duration::from_secs(5), "a");

        clock.advance(Duration::from_millis(4999));
        assert!(queue.pop_due(clock.now()).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn pop_due_includes_exact_deadline() {
        let clock = ManualClock::new();
        let mut queue = TimerQueue::new();
        queue.schedule(clock.now() + Duration::from_secs(5), "a");

        clock.advance(Duration::from_secs(5));
        assert_eq!(queue.pop_due(clock.now()), vec!["a"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn pop_due_orders_by_deadline_then_schedule_order() {
        let clock = ManualClock::new();
        let now = clock.now();
        let mut queue = TimerQueue::new();
        queue.schedule(now + Duration::from_secs(3), "late");
        queue.schedule(now + Duration::from_secs(1), "first");
        queue.schedule(now + Duration::from_secs(1), "second");
        queue.schedule(now + Duration::from_secs(9), "pending");

        clock.advance(Duration::from_secs(3));
        assert_eq!(queue.pop_due(clock.now()), vec!["first", "second", "late"]);
        assert_eq!(queue.next_deadline(), Some(now + Duration::from_secs(9)));
    }

    #[test]
    fn timer_ids_are_unique() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        let a = queue.schedule(now, ());
        let b = queue.schedule(now, ());
        assert_ne!(a, b);
    }

    #[test]
    fn clear_drops_everything() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule(now, 1);
        queue.schedule(now, 2);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
