use std::time::{Duration, Instant};

/// Handle to a pending timer, cancellable until it fires.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    id: TimerId,
    due_at: Instant,
}

/// Pending timers under a caller-supplied clock.
///
/// Deadlines drain earliest-first; equal deadlines drain in scheduling
/// order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next: u64,
    pending: Vec<Entry>,
}

impl TimerQueue {
    pub const fn new() -> Self {
        Self {
            next: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        self.pending.push(Entry {
            id,
            due_at: now + delay,
        });
        id
    }

    /// Drops a pending timer. Returns `false` when it already fired or was
    /// cancelled before; cancelling twice is safe.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        match self.pending.iter().position(|entry| entry.id == timer) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerId> {
        let mut earliest: Option<usize> = None;
        for (index, entry) in self.pending.iter().enumerate() {
            if entry.due_at > now {
                continue;
            }
            match earliest {
                Some(current) if self.pending[current].due_at <= entry.due_at => {}
                _ => earliest = Some(index),
            }
        }
        earliest.map(|index| self.pending.remove(index).id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.due_at).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
