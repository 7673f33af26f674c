//! Deadline-ordered task queue for the controller's deferred passes.
//!
//! Nothing here sleeps: the host passes the current time to
//! [`Scheduler::pop_due`] and asks [`Scheduler::next_deadline`] when to come
//! back. Tests drain the queue with [`Scheduler::pop_next`] instead.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

struct Scheduled<T> {
    id: TaskId,
    deadline: Instant,
    task: T,
}

pub struct Scheduler<T> {
    next_id: u64,
    /// Sorted by deadline; equal deadlines keep scheduling order.
    queue: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            queue: Vec::new(),
        }
    }

    pub fn schedule_at(&mut self, deadline: Instant, task: T) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let pos = self.queue.partition_point(|s| s.deadline <= deadline);
        self.queue.insert(pos, Scheduled { id, deadline, task });
        id
    }

    /// Remove a task that has not fired yet. Returns `false` if it already
    /// ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.queue.iter().position(|s| s.id == id) {
            Some(pos) => {
                self.queue.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.first().map(|s| s.deadline)
    }

    /// Earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TaskId, T)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.pop_next()
    }

    /// Earliest task regardless of its deadline.
    pub fn pop_next(&mut self) -> Option<(TaskId, T)> {
        if self.queue.is_empty() {
            return None;
        }
        let s = self.queue.remove(0);
        Some((s.id, s.task))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
