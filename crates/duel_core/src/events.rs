//! Bounded game-event queue between windowing callbacks and the frame loop.
//!
//! Producer (winit callbacks) and consumer (the frame-start drain) run on the
//! same thread between frame boundaries; the queue decouples callback-time
//! capture from game-logic-time consumption, not threads. Overflow policy is
//! drop-oldest: the newest input wins, the loss is logged, and a counter
//! tracks how much was discarded.

use crate::input::{Key, MouseBtn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(MouseBtn),
    MouseUp(MouseBtn),
    MouseMove { x: f64, y: f64 },
}

pub const EVENT_QUEUE_CAPACITY: usize = 1024;

pub struct EventQueue {
    buffer: std::collections::VecDeque<GameEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "event queue capacity must be non-zero");
        Self {
            buffer: std::collections::VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Enqueue an event. When the queue is full the OLDEST event is discarded
    /// to make room -- stale input loses to fresh input.
    pub fn push(&mut self, event: GameEvent) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
            self.dropped += 1;
            log::warn!(
                "Event queue full ({}): dropped oldest event ({} dropped total)",
                self.capacity,
                self.dropped
            );
        }
        self.buffer.push_back(event);
    }

    /// Dequeue the next event, oldest first. `None` terminates the drain loop.
    pub fn pop(&mut self) -> Option<GameEvent> {
        self.buffer.pop_front()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
