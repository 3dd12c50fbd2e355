//! Virtual-clock timer queue standing in for `setTimeout`.
//!
//! # Responsibility
//! - Hold delayed tasks against a host-advanced virtual clock.
//! - Release due tasks in due-time order, ties broken by insertion order.
//!
//! # Invariants
//! - The clock only moves forward, and only through `advance`.
//! - A task scheduled with delay `0` is still deferred until the next advance.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Timer<T> {
    due_ms: u64,
    /// Insertion sequence; breaks ties between equal due times.
    seq: u64,
    task: T,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Timer queue over a virtual millisecond clock.
#[derive(Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_seq: u64,
    timers: BinaryHeap<Reverse<Timer<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            timers: BinaryHeap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Schedules `task` to become due `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Reverse(Timer {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            task,
        }));
    }

    /// Moves the clock forward by `elapsed_ms` and returns every due task.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let mut due = Vec::new();
        while let Some(Reverse(timer)) = self.timers.peek() {
            if timer.due_ms > self.now_ms {
                break;
            }
            if let Some(Reverse(timer)) = self.timers.pop() {
                due.push(timer.task);
            }
        }
        due
    }
}
