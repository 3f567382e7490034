//! Session state and core simulation types
//!
//! Everything needed to replay a session lives here, including the RNG, so a
//! cloned session continues exactly where the original would.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, TuningError};

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign of the position change
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A falling drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Raindrop {
    pub id: u64,
    /// Horizontal position (% of field width)
    pub x: f32,
    /// Vertical position (% of field height, grows downward)
    pub y: f32,
    /// Fall distance per tick
    pub speed: f32,
}

impl Raindrop {
    /// The drop one tick later
    #[inline]
    pub fn advanced(&self) -> Self {
        Self {
            y: self.y + self.speed,
            ..*self
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Drops caught so far
    pub score: u32,
    /// Set once the win rule is satisfied; cleared only by reset
    pub is_over: bool,
    /// Character position (% of field width), always within tuning bounds
    pub character_position: f32,
    /// Live drops in spawn order
    pub drops: Vec<Raindrop>,
    /// Ticks that advanced the simulation
    pub ticks: u64,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    next_id: u64,
}

impl Session {
    /// Create a new session with the given seed and tuning.
    ///
    /// Fails if the tuning does not describe a playable session.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::with_valid_tuning(seed, tuning))
    }

    /// Create a new session with the default tuning
    pub fn seeded(seed: u64) -> Self {
        Self::with_valid_tuning(seed, Tuning::default())
    }

    fn with_valid_tuning(seed: u64, tuning: Tuning) -> Self {
        let character_position = tuning.clamp_position(tuning.initial_position);
        Self {
            score: 0,
            is_over: false,
            character_position,
            drops: Vec::new(),
            ticks: 0,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new drop ID
    pub fn next_drop_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::seeded(0)
    }
}

/// A single input to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Spawn,
    Tick,
    Move(Direction),
    Reset,
}

/// Produce the session that follows `session` after `event`.
///
/// The input is never modified.
pub fn apply(session: &Session, event: Event) -> Session {
    let mut next = session.clone();
    match event {
        Event::Spawn => {
            super::spawn::spawn_drop(&mut next);
        }
        Event::Tick => {
            super::tick::tick(&mut next);
        }
        Event::Move(direction) => super::control::move_character(&mut next, direction),
        Event::Reset => super::control::reset_session(&mut next),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new(7, Tuning::default()).unwrap();
        assert_eq!(session.score, 0);
        assert!(!session.is_over);
        assert_eq!(session.character_position, 50.0);
        assert!(session.drops.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut session = Session::default();
        let a = session.next_drop_id();
        let b = session.next_drop_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let session = Session::new(3, Tuning::default()).unwrap();
        let before = session.clone();

        let spawned = apply(&session, Event::Spawn);
        assert_eq!(session, before);
        assert_eq!(spawned.drops.len(), 1);

        let moved = apply(&spawned, Event::Move(Direction::Left));
        assert_eq!(moved.character_position, 45.0);
        assert_eq!(spawned.character_position, 50.0);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let events = [
            Event::Spawn,
            Event::Tick,
            Event::Move(Direction::Right),
            Event::Spawn,
            Event::Tick,
            Event::Tick,
        ];

        let run = |seed| {
            events
                .iter()
                .fold(Session::new(seed, Tuning::default()).unwrap(), |s, e| apply(&s, *e))
        };

        assert_eq!(run(99999), run(99999));
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Left.sign(), -1.0);
        assert_eq!(Direction::Right.sign(), 1.0);
    }

    #[test]
    fn test_new_rejects_invalid_tuning() {
        let inverted = Tuning {
            move_bounds: (90.0, 10.0),
            ..Tuning::default()
        };
        assert_eq!(
            Session::new(1, inverted),
            Err(TuningError::InvalidBounds(90.0, 10.0))
        );

        let stalled = Tuning {
            tick_period_ms: 0,
            ..Tuning::default()
        };
        assert_eq!(Session::new(1, stalled), Err(TuningError::ZeroPeriod));
    }
}
