//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (`clock`)
//! - Input events (`input`)
//! - JS bindings and timer registration (`web`, wasm32 only)

pub mod clock;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;
