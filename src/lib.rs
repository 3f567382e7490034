//! Rain Catch - a falling-drop catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catches, win/reset)
//! - `tuning`: Data-driven game balance
//! - `game`: Runtime that drives a session from elapsed time
//! - `platform`: Browser/native platform abstraction
//! - `assets`: Image references passed through to the renderer

pub mod assets;
pub mod game;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use assets::{AssetOverrides, AssetSlot, GameAssets};
pub use game::{FrameReport, Game};
pub use tuning::{MovementPolicy, Tuning, TuningError, TuningPreset, WinRule};
