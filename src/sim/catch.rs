//! Catch detection
//!
//! A drop is caught when it sits inside the basket's window: horizontally
//! within `catch_tolerance` of the basket center (exclusive), and vertically
//! inside the catch band (inclusive at both edges).

use serde::{Deserialize, Serialize};

use super::state::{Raindrop, Session};

/// The basket's catch window for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatchZone {
    pub center_x: f32,
    pub tolerance: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl CatchZone {
    /// The catch zone for the session's current character position
    pub fn for_session(session: &Session) -> Self {
        let tuning = &session.tuning;
        Self {
            center_x: session.character_position + tuning.basket_offset,
            tolerance: tuning.catch_tolerance,
            y_min: tuning.catch_band.0,
            y_max: tuning.catch_band.1,
        }
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (x - self.center_x).abs() < self.tolerance && y >= self.y_min && y <= self.y_max
    }
}

/// What happens to a drop after it has moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    Caught,
    OutOfBounds,
    Alive,
}

/// Classify an already-advanced drop. Caught wins over out-of-bounds.
pub fn classify(zone: &CatchZone, drop: &Raindrop, field_bottom: f32) -> Fate {
    if zone.contains(drop.x, drop.y) {
        Fate::Caught
    } else if drop.y >= field_bottom {
        Fate::OutOfBounds
    } else {
        Fate::Alive
    }
}
