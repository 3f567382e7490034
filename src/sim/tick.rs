//! Fixed-period simulation tick
//!
//! Moves every drop, then sorts each one into caught / out-of-bounds / alive
//! in a single pass so no drop can land in two buckets.

use serde::{Deserialize, Serialize};

use super::catch::{CatchZone, Fate, classify};
use super::state::Session;

/// What a tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub caught: u32,
    pub out_of_bounds: u32,
    /// The session became won during this tick
    pub won: bool,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.caught == 0 && self.out_of_bounds == 0 && !self.won
    }
}

/// Advance the session by one tick
pub fn tick(session: &mut Session) -> TickReport {
    if session.is_over {
        return TickReport::default();
    }

    let zone = CatchZone::for_session(session);
    let field_bottom = session.tuning.field_bottom;
    let (win_rule, win_threshold) = (session.tuning.win_rule, session.tuning.win_threshold);

    let mut report = TickReport::default();
    let mut alive = Vec::with_capacity(session.drops.len());

    // Catches count one at a time in spawn order. After the winning catch
    // the remaining drops only move.
    for drop in session.drops.iter().map(|d| d.advanced()) {
        if report.won {
            alive.push(drop);
            continue;
        }
        match classify(&zone, &drop, field_bottom) {
            Fate::Caught => {
                report.caught += 1;
                session.score += 1;
                log::debug!("Caught drop {} at ({:.1}, {:.1})", drop.id, drop.x, drop.y);
                report.won = win_rule.is_won(session.score, win_threshold);
            }
            Fate::OutOfBounds => report.out_of_bounds += 1,
            Fate::Alive => alive.push(drop),
        }
    }

    session.drops = alive;
    session.ticks += 1;

    if report.won {
        session.is_over = true;
        log::info!("Session won with score {} after {} ticks", session.score, session.ticks);
    }

    report
}
