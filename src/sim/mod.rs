//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, carried inside the session
//! - Drops kept in spawn order
//! - No rendering, timer or platform dependencies

pub mod catch;
pub mod control;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use catch::{CatchZone, Fate, classify};
pub use control::{move_character, reset_session};
pub use snapshot::{DropView, SessionView};
pub use spawn::{FIELD_WIDTH, spawn_drop, spawn_drop_at};
pub use state::{Direction, Event, Raindrop, Session, apply};
pub use tick::{TickReport, tick};
