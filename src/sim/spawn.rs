//! Drop spawning

use rand::Rng;

use super::state::{Raindrop, Session};

/// Width of the play field (%); spawned x is drawn from [0, FIELD_WIDTH)
pub const FIELD_WIDTH: f32 = 100.0;

/// Append a drop at a random column with a random speed.
///
/// Returns the new drop's ID, or `None` once the session is over.
pub fn spawn_drop(session: &mut Session) -> Option<u64> {
    if session.is_over {
        return None;
    }

    let (min_speed, max_speed) = session.tuning.speed_range;
    let x = session.rng.random_range(0.0f32..FIELD_WIDTH);
    let speed = if min_speed < max_speed {
        session.rng.random_range(min_speed..max_speed)
    } else {
        min_speed
    };

    spawn_drop_at(session, x, speed)
}

/// Append a drop at a chosen column and speed
pub fn spawn_drop_at(session: &mut Session, x: f32, speed: f32) -> Option<u64> {
    if session.is_over {
        return None;
    }

    let id = session.next_drop_id();
    session.drops.push(Raindrop {
        id,
        x,
        y: session.tuning.spawn_y,
        speed,
    });
    log::debug!("Spawned drop {} at x={:.1} speed={:.2}", id, x, speed);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_spawn_within_ranges() {
        let mut session = Session::new(12345, Tuning::default()).unwrap();

        for _ in 0..200 {
            spawn_drop(&mut session);
        }

        assert_eq!(session.drops.len(), 200);
        for drop in &session.drops {
            assert!((0.0..100.0).contains(&drop.x));
            assert!((1.0..2.0).contains(&drop.speed));
            assert_eq!(drop.y, -5.0);
        }
    }

    #[test]
    fn test_spawn_preserves_order_and_unique_ids() {
        let mut session = Session::default();
        let a = spawn_drop(&mut session).unwrap();
        let b = spawn_drop(&mut session).unwrap();
        let c = spawn_drop_at(&mut session, 10.0, 1.5).unwrap();

        let ids: Vec<u64> = session.drops.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_spawn_noop_when_over() {
        let mut session = Session::default();
        session.is_over = true;
        let before = session.clone();

        assert_eq!(spawn_drop(&mut session), None);
        assert_eq!(spawn_drop_at(&mut session, 50.0, 1.0), None);
        assert_eq!(session, before);
    }

    #[test]
    fn test_same_seed_same_drops() {
        let mut a = Session::new(42, Tuning::default()).unwrap();
        let mut b = Session::new(42, Tuning::default()).unwrap();
        for _ in 0..10 {
            spawn_drop(&mut a);
            spawn_drop(&mut b);
        }
        assert_eq!(a.drops, b.drops);

        let mut c = Session::new(43, Tuning::default()).unwrap();
        spawn_drop(&mut c);
        assert_ne!(a.drops[0].x, c.drops[0].x);
    }
}
