//! Keyboard and swipe input mapping

use crate::sim::Direction;

/// Horizontal drag distance (px) that counts as one swipe step
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Map a `KeyboardEvent.key` value to a direction
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Turns a touch drag into discrete move steps
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    anchor: Option<f32>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self { anchor: None }
    }

    pub fn begin(&mut self, x: f32) {
        self.anchor = Some(x);
    }

    /// Report a touch move. Emits a direction once the drag passes the
    /// threshold and re-anchors at the current point.
    pub fn moved(&mut self, x: f32) -> Option<Direction> {
        let anchor = self.anchor?;
        let diff = anchor - x;
        if diff.abs() <= SWIPE_THRESHOLD {
            return None;
        }

        self.anchor = Some(x);
        Some(if diff > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        })
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}
