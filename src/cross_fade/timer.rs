//! One-shot timers driven by the frame loop.
//!
//! Nothing here runs on its own: the host calls [`Timers::advance`] once per
//! frame with the frame time and [`Timers::flush_deferred`] after a commit.
//! A timer therefore never fires inside the call that scheduled it.

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    remaining: f32,
    task: T,
}

#[derive(Debug)]
pub struct Timers<T> {
    next_id: u64,
    timed: Vec<Pending<T>>,
    deferred: Vec<(TimerId, T)>,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            timed: Vec::new(),
            deferred: Vec::new(),
        }
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fires `task` from the first `advance` call at which `delay` seconds
    /// have accumulated. Negative delays behave like zero.
    pub fn schedule(&mut self, delay: f32, task: T) -> TimerId {
        let id = self.allocate();
        trace!(?id, delay, "timer scheduled");
        self.timed.push(Pending {
            id,
            remaining: delay.max(0.0),
            task,
        });
        id
    }

    /// Queues `task` for the next `flush_deferred`.
    pub fn defer(&mut self, task: T) -> TimerId {
        let id = self.allocate();
        trace!(?id, "task deferred");
        self.deferred.push((id, task));
        id
    }

    /// Cancelling an unknown, fired or already cancelled id does nothing.
    pub fn cancel(&mut self, id: TimerId) {
        self.timed.retain(|pending| pending.id != id);
        self.deferred.retain(|(deferred_id, _)| *deferred_id != id);
    }

    pub fn clear(&mut self) {
        self.timed.clear();
        self.deferred.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timed.iter().any(|pending| pending.id == id)
            || self.deferred.iter().any(|(deferred_id, _)| *deferred_id == id)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.timed.is_empty() && self.deferred.is_empty()
    }

    /// Advances time by `dt` seconds and returns the due tasks in the order
    /// they were scheduled.
    pub fn advance(&mut self, dt: f32) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.timed.len());
        for mut pending in self.timed.drain(..) {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                due.push((pending.id, pending.task));
            } else {
                waiting.push(pending);
            }
        }
        self.timed = waiting;
        due
    }

    pub fn flush_deferred(&mut self) -> Vec<(TimerId, T)> {
        std::mem::take(&mut self.deferred)
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks<T>(fired: Vec<(TimerId, T)>) -> Vec<T> {
        fired.into_iter().map(|(_, task)| task).collect()
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut timers = Timers::new();
        let id = timers.schedule(0.0, "done");
        assert!(timers.is_pending(id));
        assert_eq!(tasks(timers.advance(0.0)), vec!["done"]);
        assert!(!timers.is_pending(id));
    }

    #[test]
    fn fires_once_delay_has_accumulated() {
        let mut timers = Timers::new();
        timers.schedule(0.1, 1);
        timers.schedule(0.25, 2);
        assert!(timers.advance(0.05).is_empty());
        assert_eq!(tasks(timers.advance(0.05)), vec![1]);
        assert!(timers.advance(0.1).is_empty());
        assert_eq!(tasks(timers.advance(0.1)), vec![2]);
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = Timers::new();
        let id = timers.schedule(1.0, ());
        timers.cancel(id);
        timers.cancel(id);
        assert!(timers.advance(2.0).is_empty());

        let fired = timers.schedule(0.0, ());
        timers.advance(0.0);
        timers.cancel(fired);
        assert!(timers.is_empty());
    }

    #[test]
    fn deferred_tasks_wait_for_flush() {
        let mut timers = Timers::new();
        let dropped = timers.defer("stale");
        timers.defer("fresh");
        timers.cancel(dropped);
        assert!(timers.advance(1.0).is_empty());
        assert_eq!(tasks(timers.flush_deferred()), vec!["fresh"]);
        assert!(timers.flush_deferred().is_empty());
    }
}
