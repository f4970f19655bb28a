//! One-shot timers driven by the controller's own clock.
//!
//! Nothing runs on its own: the event loop reports elapsed time through
//! [`GameController::tick`](super::GameController::tick), which drains
//! every task that came due in that window, earliest first.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// The deferred transition a timer stands for. Each carries the scenario
/// index it was scheduled under so a late firing can tell it is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    RevealCorrect { scenario: usize },
    ShowFeedback { scenario: usize, correct: bool },
    AutoAdvance { scenario: usize },
}

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due: Duration,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|s| s.id == id)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Removes the earliest task due at or before `until` and moves the
    /// clock to its due time, so anything it schedules is measured from
    /// when it fired. Ties go to the task scheduled first.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskId, Task)> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.id))
            .map(|(position, _)| position)?;
        let fired = self.pending.swap_remove(position);
        self.now = self.now.max(fired.due);
        Some((fired.id, fired.task))
    }

    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
