//! L4 Atomic Layer: Sliding window of recent wheel events
//!
//! Measures input density for scroll acceleration. Each engine owns one.

use std::collections::VecDeque;

/// Events older than this (relative to the newest) no longer count
pub const WINDOW_MS: u64 = 500;

/// Number of events in the window that gives full acceleration
pub const SATURATION: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct DeltaEventQueue {
    stamps: VecDeque<u64>,
}

impl DeltaEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arrival and evict every stamp more than [`WINDOW_MS`] older.
    ///
    /// Timestamps are expected to be non-decreasing; an out-of-order stamp is
    /// kept and ages out like any other.
    pub fn record_event(&mut self, now_ms: u64) {
        self.stamps.push_back(now_ms);
        while let Some(&front) = self.stamps.front() {
            if now_ms.saturating_sub(front) > WINDOW_MS {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// `min(len / 15, 1)`
    pub fn acceleration_ratio(&self) -> f64 {
        (self.stamps.len() as f64 / SATURATION as f64).min(1.0)
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    /// Stamps currently inside the window, oldest first
    pub fn stamps(&self) -> impl Iterator<Item = u64> + '_ {
        self.stamps.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_has_no_acceleration() {
        let queue = DeltaEventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.acceleration_ratio(), 0.0);
    }

    #[test]
    fn test_old_events_are_evicted() {
        let mut queue = DeltaEventQueue::new();
        for t in [0, 100, 600] {
            queue.record_event(t);
        }
        // 600 - 0 > 500, but 600 - 100 is exactly the window and stays
        assert_eq!(queue.stamps().collect::<Vec<_>>(), vec![100, 600]);

        queue.record_event(700);
        assert_eq!(queue.stamps().collect::<Vec<_>>(), vec![600, 700]);
        assert!((queue.acceleration_ratio() - 2.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_saturates() {
        let mut queue = DeltaEventQueue::new();
        for i in 0..40 {
            queue.record_event(i * 10);
        }
        assert_eq!(queue.acceleration_ratio(), 1.0);
    }

    #[test]
    fn test_ratio_stays_within_unit_interval() {
        let mut queue = DeltaEventQueue::new();
        for i in 0..100u64 {
            queue.record_event(i * 37);
            let r = queue.acceleration_ratio();
            assert!((0.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_clear() {
        let mut queue = DeltaEventQueue::new();
        queue.record_event(5);
        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}
