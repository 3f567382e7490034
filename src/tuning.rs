//! Data-driven game balance
//!
//! Every number the simulation depends on lives in [`Tuning`]. Recorded
//! variants of the game disagree on catch geometry, win rule and whether the
//! basket may move after a win, so none of it is hard-coded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the score is compared against the win threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WinRule {
    /// Won once score >= threshold
    #[default]
    AtLeast,
    /// Won only when score == threshold
    Exactly,
}

impl WinRule {
    pub fn is_won(&self, score: u32, threshold: u32) -> bool {
        match self {
            WinRule::AtLeast => score >= threshold,
            WinRule::Exactly => score == threshold,
        }
    }
}

/// Whether the basket responds to input after the session is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementPolicy {
    #[default]
    LockedWhenOver,
    FreeWhenOver,
}

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Narrow basket lane, slow drops, low catch band
    #[default]
    Classic,
    /// Full-width lane, faster drops, higher catch band
    Open,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::Open => "Open",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(TuningPreset::Classic),
            "open" => Some(TuningPreset::Open),
            _ => None,
        }
    }
}

/// Longest accepted spawn or tick period (browser timers take an i32)
pub const MAX_PERIOD_MS: u32 = i32::MAX as u32;

/// Simulation tuning constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Milliseconds between spawns
    pub spawn_period_ms: u32,
    /// Milliseconds between simulation ticks
    pub tick_period_ms: u32,

    // === Basket movement ===
    /// Horizontal shift per move input (% of field)
    pub move_step: f32,
    /// Inclusive (min, max) range for the character position
    pub move_bounds: (f32, f32),
    /// Position after a reset
    pub initial_position: f32,
    pub movement_policy: MovementPolicy,

    // === Drops ===
    /// Half-open [min, max) range of fall speed (% per tick)
    pub speed_range: (f32, f32),
    /// Vertical position new drops appear at
    pub spawn_y: f32,
    /// Drops at or below this y have left the field
    pub field_bottom: f32,

    // === Catch zone ===
    /// Basket center relative to the character position
    pub basket_offset: f32,
    /// Horizontal half-width of the catch window (exclusive)
    pub catch_tolerance: f32,
    /// Inclusive (top, bottom) vertical band where drops can be caught
    pub catch_band: (f32, f32),

    // === Win condition ===
    pub win_threshold: u32,
    pub win_rule: WinRule,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_period_ms: 2000,
            tick_period_ms: 50,

            move_step: 5.0,
            move_bounds: (10.0, 90.0),
            initial_position: 50.0,
            movement_policy: MovementPolicy::LockedWhenOver,

            speed_range: (1.0, 2.0),
            spawn_y: -5.0,
            field_bottom: 100.0,

            basket_offset: 8.0,
            catch_tolerance: 8.0,
            catch_band: (75.0, 85.0),

            win_threshold: 5,
            win_rule: WinRule::AtLeast,
        }
    }
}

impl Tuning {
    /// Create tuning from a preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        match preset {
            TuningPreset::Classic => Self::default(),
            TuningPreset::Open => Self {
                move_bounds: (0.0, 100.0),
                movement_policy: MovementPolicy::FreeWhenOver,
                speed_range: (2.0, 4.0),
                basket_offset: 0.0,
                catch_tolerance: 10.0,
                catch_band: (60.0, 80.0),
                win_rule: WinRule::Exactly,
                ..Self::default()
            },
        }
    }

    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Clamp a character position into the movement bounds.
    ///
    /// Never panics; inverted bounds resolve to the upper bound.
    #[inline]
    pub fn clamp_position(&self, position: f32) -> f32 {
        position.max(self.move_bounds.0).min(self.move_bounds.1)
    }

    /// Check that the values describe a playable session
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_period_ms == 0 || self.tick_period_ms == 0 {
            return Err(TuningError::ZeroPeriod);
        }
        let longest = self.spawn_period_ms.max(self.tick_period_ms);
        if longest > MAX_PERIOD_MS {
            return Err(TuningError::PeriodTooLong(longest));
        }
        if !(self.move_step.is_finite() && self.move_step > 0.0) {
            return Err(TuningError::InvalidStep(self.move_step));
        }

        let (lo, hi) = self.move_bounds;
        if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
            return Err(TuningError::InvalidBounds(lo, hi));
        }
        if !(lo..=hi).contains(&self.initial_position) {
            return Err(TuningError::InitialOutOfBounds(self.initial_position));
        }

        let (min, max) = self.speed_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(TuningError::InvalidSpeedRange(min, max));
        }

        let (top, bottom) = self.catch_band;
        if !(top.is_finite() && bottom.is_finite() && top <= bottom) {
            return Err(TuningError::InvalidCatchBand(top, bottom));
        }
        if !(self.catch_tolerance.is_finite() && self.catch_tolerance >= 0.0) {
            return Err(TuningError::InvalidTolerance(self.catch_tolerance));
        }
        if !(self.spawn_y.is_finite()
            && self.field_bottom.is_finite()
            && self.basket_offset.is_finite())
        {
            return Err(TuningError::NonFinite);
        }

        if self.win_threshold == 0 {
            return Err(TuningError::ZeroWinThreshold);
        }

        Ok(())
    }
}

/// Rejected tuning
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    ZeroPeriod,
    PeriodTooLong(u32),
    InvalidStep(f32),
    InvalidBounds(f32, f32),
    InitialOutOfBounds(f32),
    InvalidSpeedRange(f32, f32),
    InvalidCatchBand(f32, f32),
    InvalidTolerance(f32),
    NonFinite,
    ZeroWinThreshold,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(msg) => write!(f, "invalid tuning json: {}", msg),
            TuningError::ZeroPeriod => write!(f, "spawn and tick periods must be non-zero"),
            TuningError::PeriodTooLong(ms) => {
                write!(f, "period of {} ms exceeds the {} ms limit", ms, MAX_PERIOD_MS)
            }
            TuningError::InvalidStep(step) => write!(f, "move step must be positive, got {}", step),
            TuningError::InvalidBounds(lo, hi) => {
                write!(f, "movement bounds ({}, {}) are not an ordered range", lo, hi)
            }
            TuningError::InitialOutOfBounds(pos) => {
                write!(f, "initial position {} is outside the movement bounds", pos)
            }
            TuningError::InvalidSpeedRange(min, max) => {
                write!(f, "speed range [{}, {}) must satisfy 0 < min < max", min, max)
            }
            TuningError::InvalidCatchBand(top, bottom) => {
                write!(f, "catch band ({}, {}) is not an ordered range", top, bottom)
            }
            TuningError::InvalidTolerance(tol) => {
                write!(f, "catch tolerance must be non-negative, got {}", tol)
            }
            TuningError::NonFinite => write!(f, "tuning contains a non-finite value"),
            TuningError::ZeroWinThreshold => write!(f, "win threshold must be at least 1"),
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::from_preset(TuningPreset::Open).validate().is_ok());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(TuningPreset::from_str("OPEN"), Some(TuningPreset::Open));
        assert_eq!(TuningPreset::from_str("classic"), Some(TuningPreset::Classic));
        assert_eq!(TuningPreset::from_str("hard"), None);
        assert_eq!(TuningPreset::Open.as_str(), "Open");
    }

    #[test]
    fn test_win_rule() {
        assert!(WinRule::AtLeast.is_won(5, 5));
        assert!(WinRule::AtLeast.is_won(6, 5));
        assert!(!WinRule::AtLeast.is_won(4, 5));
        assert!(WinRule::Exactly.is_won(5, 5));
        assert!(!WinRule::Exactly.is_won(6, 5));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"win_threshold": 3, "catch_band": [60.0, 80.0]}"#)
            .expect("valid tuning");
        assert_eq!(tuning.win_threshold, 3);
        assert_eq!(tuning.catch_band, (60.0, 80.0));
        assert_eq!(tuning.move_step, 5.0);
        assert_eq!(tuning.spawn_period_ms, 2000);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("{not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(
            Tuning::from_json(r#"{"speed_range": [2.0, 2.0]}"#),
            Err(TuningError::InvalidSpeedRange(2.0, 2.0))
        );
        assert_eq!(
            Tuning::from_json(r#"{"win_threshold": 0}"#),
            Err(TuningError::ZeroWinThreshold)
        );
        assert_eq!(
            Tuning::from_json(r#"{"initial_position": 95.0}"#),
            Err(TuningError::InitialOutOfBounds(95.0))
        );
        assert_eq!(
            Tuning::from_json(r#"{"tick_period_ms": 0}"#),
            Err(TuningError::ZeroPeriod)
        );
    }

    #[test]
    fn test_clamp_position() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clamp_position(3.0), 10.0);
        assert_eq!(tuning.clamp_position(97.0), 90.0);
        assert_eq!(tuning.clamp_position(42.0), 42.0);
    }

    #[test]
    fn test_inverted_bounds_rejected_and_clamp_safe() {
        let tuning = Tuning {
            move_bounds: (90.0, 10.0),
            ..Tuning::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::InvalidBounds(90.0, 10.0)));
        assert_eq!(tuning.clamp_position(50.0), 10.0);
    }

    #[test]
    fn test_period_limit() {
        let at_limit = Tuning {
            spawn_period_ms: MAX_PERIOD_MS,
            ..Tuning::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_long = Tuning {
            tick_period_ms: u32::MAX,
            ..Tuning::default()
        };
        assert_eq!(too_long.validate(), Err(TuningError::PeriodTooLong(u32::MAX)));
        assert!(Tuning::from_json(r#"{"spawn_period_ms": 3000000000}"#).is_err());
    }
}
