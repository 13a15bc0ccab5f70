//! Deferred events keyed by simulation time
//!
//! Spawn timers and projectile lifetimes are entries in a min-heap ordered by
//! due time. The tick drains everything that has come due; nothing runs
//! outside a tick.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work to perform once its due time is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    SpawnEnemy,
    SpawnPowerUp,
    ExpireProjectile { id: u32 },
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    /// Insertion order, breaks ties so equal due times run FIFO
    seq: u64,
    event: Deferred,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so BinaryHeap (a max-heap) pops the earliest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_ms
            .total_cmp(&self.due_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deferred-event queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, event: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { due_ms, seq, event });
    }

    /// Pop the earliest event due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, Deferred)> {
        if self.heap.peek()?.due_ms > now_ms {
            return None;
        }
        self.heap.pop().map(|e| (e.due_ms, e.event))
    }

    /// Due time of the next pending event
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.due_ms)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(5000.0, Deferred::SpawnPowerUp);
        s.schedule(1200.0, Deferred::ExpireProjectile { id: 4 });
        s.schedule(3000.0, Deferred::SpawnEnemy);

        assert_eq!(s.pop_due(1000.0), None);
        assert_eq!(
            s.pop_due(6000.0),
            Some((1200.0, Deferred::ExpireProjectile { id: 4 }))
        );
        assert_eq!(s.pop_due(6000.0), Some((3000.0, Deferred::SpawnEnemy)));
        assert_eq!(s.pop_due(6000.0), Some((5000.0, Deferred::SpawnPowerUp)));
        assert!(s.is_empty());
    }

    #[test]
    fn test_equal_due_times_are_fifo() {
        let mut s = Scheduler::new();
        s.schedule(100.0, Deferred::ExpireProjectile { id: 1 });
        s.schedule(100.0, Deferred::ExpireProjectile { id: 2 });
        s.schedule(100.0, Deferred::ExpireProjectile { id: 3 });

        let order: Vec<_> = std::iter::from_fn(|| s.pop_due(100.0)).collect();
        assert_eq!(
            order,
            vec![
                (100.0, Deferred::ExpireProjectile { id: 1 }),
                (100.0, Deferred::ExpireProjectile { id: 2 }),
                (100.0, Deferred::ExpireProjectile { id: 3 }),
            ]
        );
    }

    #[test]
    fn test_due_exactly_now_fires() {
        let mut s = Scheduler::new();
        s.schedule(3000.0, Deferred::SpawnEnemy);
        assert_eq!(s.next_due(), Some(3000.0));
        assert!(s.pop_due(2999.0).is_none());
        assert!(s.pop_due(3000.0).is_some());
    }
}
