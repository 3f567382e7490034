//! Character movement and session reset

use super::state::{Direction, Session};
use crate::tuning::MovementPolicy;

/// Shift the character one step, clamped to the movement bounds
pub fn move_character(session: &mut Session, direction: Direction) {
    if session.is_over && session.tuning.movement_policy == MovementPolicy::LockedWhenOver {
        return;
    }

    let target = session.character_position + direction.sign() * session.tuning.move_step;
    session.character_position = session.tuning.clamp_position(target);
}

/// Return the session to its starting state.
///
/// The RNG stream and ID counter keep running so drop IDs stay unique.
pub fn reset_session(session: &mut Session) {
    session.score = 0;
    session.is_over = false;
    session.character_position = session.tuning.clamp_position(session.tuning.initial_position);
    session.drops.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Tuning, TuningPreset};

    #[test]
    fn test_move_steps_and_clamps() {
        let mut session = Session::default();

        move_character(&mut session, Direction::Right);
        assert_eq!(session.character_position, 55.0);

        for _ in 0..20 {
            move_character(&mut session, Direction::Right);
        }
        assert_eq!(session.character_position, 90.0);

        for _ in 0..20 {
            move_character(&mut session, Direction::Left);
        }
        assert_eq!(session.character_position, 10.0);
    }

    #[test]
    fn test_move_locked_after_win() {
        let mut session = Session::default();
        session.is_over = true;

        move_character(&mut session, Direction::Left);
        assert_eq!(session.character_position, 50.0);
    }

    #[test]
    fn test_move_free_after_win() {
        let mut session = Session::new(1, Tuning::from_preset(TuningPreset::Open)).unwrap();
        session.is_over = true;

        move_character(&mut session, Direction::Left);
        assert_eq!(session.character_position, 45.0);
    }

    #[test]
    fn test_left_then_right_round_trips() {
        let mut session = Session::default();
        move_character(&mut session, Direction::Left);
        move_character(&mut session, Direction::Right);
        assert_eq!(session.character_position, 50.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::default();
        session.score = 5;
        session.is_over = true;
        session.character_position = 10.0;
        session.drops.push(crate::sim::Raindrop {
            id: 99,
            x: 1.0,
            y: 2.0,
            speed: 1.0,
        });

        reset_session(&mut session);

        assert_eq!(session.score, 0);
        assert!(!session.is_over);
        assert_eq!(session.character_position, 50.0);
        assert!(session.drops.is_empty());
    }
}
