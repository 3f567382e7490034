//! Fixed-period timers driven by elapsed wall time
//!
//! The host calls [`Timers::advance`] with the milliseconds since the last
//! call and receives how many spawns and ticks are due.

use crate::tuning::Tuning;

/// Maximum periods a single advance may fire (prevents spiral of death)
pub const MAX_CATCHUP: u32 = 8;

/// Largest elapsed time accepted per advance, in milliseconds
pub const MAX_FRAME_MS: f64 = 1000.0;

/// One fixed-period timer
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period_ms: f64,
    accumulator: f64,
}

impl Interval {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: f64::from(period_ms.max(1)),
            accumulator: 0.0,
        }
    }

    /// Add elapsed time and return how many periods completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }

        self.accumulator += dt_ms.min(MAX_FRAME_MS);

        let mut fired = 0;
        while self.accumulator >= self.period_ms && fired < MAX_CATCHUP {
            self.accumulator -= self.period_ms;
            fired += 1;
        }

        // Drop backlog that could not be caught up
        if fired == MAX_CATCHUP && self.accumulator >= self.period_ms {
            log::warn!(
                "Timer fell behind, dropping {:.0}ms of backlog",
                self.accumulator
            );
            self.accumulator %= self.period_ms;
        }

        fired
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Periods fired by one advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub spawns: u32,
    pub ticks: u32,
}

/// The spawn timer and the tick timer
#[derive(Debug, Clone, PartialEq)]
pub struct Timers {
    pub spawn: Interval,
    pub tick: Interval,
}

impl Timers {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn: Interval::new(tuning.spawn_period_ms),
            tick: Interval::new(tuning.tick_period_ms),
        }
    }

    pub fn advance(&mut self, dt_ms: f64) -> Fired {
        Fired {
            spawns: self.spawn.advance(dt_ms),
            ticks: self.tick.advance(dt_ms),
        }
    }

    pub fn reset(&mut self) {
        self.spawn.reset();
        self.tick.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_accumulates() {
        let mut interval = Interval::new(50);
        assert_eq!(interval.advance(30.0), 0);
        assert_eq!(interval.advance(30.0), 1);
        assert_eq!(interval.advance(90.0), 2);
    }

    #[test]
    fn test_interval_ignores_bad_input() {
        let mut interval = Interval::new(50);
        assert_eq!(interval.advance(-10.0), 0);
        assert_eq!(interval.advance(f64::NAN), 0);
        assert_eq!(interval.advance(0.0), 0);
    }

    #[test]
    fn test_catchup_is_capped() {
        let mut interval = Interval::new(50);
        assert_eq!(interval.advance(10_000.0), MAX_CATCHUP);
        // Backlog was dropped, so the next small step fires at most once
        assert!(interval.advance(50.0) <= 1);
    }

    #[test]
    fn test_timers_follow_tuning() {
        let mut timers = Timers::new(&Tuning::default());
        let mut fired = Fired::default();
        for _ in 0..40 {
            let f = timers.advance(50.0);
            fired.spawns += f.spawns;
            fired.ticks += f.ticks;
        }
        assert_eq!(fired, Fired { spawns: 1, ticks: 40 });
    }
}
