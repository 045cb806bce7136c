//! One-shot timers on a virtual clock
//!
//! Deferred work (bird fade start, level clear) is queued here and consumed
//! by the frame loop instead of running as ambient callbacks. Timers that
//! refer to a bird can be cancelled through their handle when the bird goes
//! away.

use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// Handle returned by [`TimerQueue::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Start fading a spent bird
    BirdFade { bird: EntityId },
    /// Announce the cleared level and advance
    LevelClear { level: u32 },
}

impl TimerKind {
    pub fn bird(&self) -> Option<EntityId> {
        match *self {
            TimerKind::BirdFade { bird } => Some(bird),
            TimerKind::LevelClear { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    due: u64,
    kind: TimerKind,
}

/// Pending timers plus the monotonic tick clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    now: u64,
    next_id: u64,
    /// Sorted by (due, id)
    pending: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Arm a timer `delay` ticks from now
    pub fn schedule(&mut self, delay: u64, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        // Equal due times keep insertion order
        let index = self.pending.partition_point(|t| t.due <= due);
        self.pending.insert(index, Timer { id, due, kind });
        id
    }

    /// Returns true if the timer was still pending
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Drop every bird timer (level reset)
    pub fn cancel_bird_timers(&mut self) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind.bird().is_none());
        before - self.pending.len()
    }

    pub fn is_pending(&self, kind: &TimerKind) -> bool {
        self.pending.iter().any(|t| &t.kind == kind)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move the clock forward one tick and pop everything now due, in due order
    pub fn advance(&mut self) -> Vec<TimerKind> {
        self.now += 1;
        let split = self.pending.partition_point(|t| t.due <= self.now);
        self.pending.drain(..split).map(|t| t.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay_once() {
        let mut queue = TimerQueue::new();
        queue.schedule(3, TimerKind::BirdFade { bird: 1 });

        assert!(queue.advance().is_empty());
        assert!(queue.advance().is_empty());
        assert_eq!(queue.advance(), vec![TimerKind::BirdFade { bird: 1 }]);
        assert!(queue.advance().is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(2, TimerKind::LevelClear { level: 1 });
        queue.schedule(1, TimerKind::BirdFade { bird: 5 });
        queue.schedule(2, TimerKind::BirdFade { bird: 6 });

        assert_eq!(queue.advance(), vec![TimerKind::BirdFade { bird: 5 }]);
        assert_eq!(
            queue.advance(),
            vec![
                TimerKind::LevelClear { level: 1 },
                TimerKind::BirdFade { bird: 6 }
            ]
        );
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(1, TimerKind::BirdFade { bird: 2 });
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert!(queue.advance().is_empty());
    }

    #[test]
    fn test_cancel_bird_timers_keeps_level_timer() {
        let mut queue = TimerQueue::new();
        let fade = queue.schedule(5, TimerKind::BirdFade { bird: 2 });
        queue.schedule(5, TimerKind::BirdFade { bird: 3 });
        queue.schedule(5, TimerKind::LevelClear { level: 2 });

        assert!(queue.cancel(fade));
        assert_eq!(queue.cancel_bird_timers(), 1);
        assert_eq!(queue.len(), 1);
        assert!(queue.is_pending(&TimerKind::LevelClear { level: 2 }));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut queue = TimerQueue::new();
        for expected in 1..=10 {
            queue.advance();
            assert_eq!(queue.now(), expected);
        }
    }
}
