//! Game runtime: one session plus the timers and assets that drive it

use crate::assets::{AssetOverrides, AssetSlot, GameAssets};
use crate::platform::clock::Timers;
use crate::sim::{
    Direction, Session, SessionView, TickReport, move_character, reset_session, spawn_drop, tick,
};
use crate::tuning::{Tuning, TuningError};

/// Summary of one [`Game::advance`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: u32,
    pub ticks: u32,
    pub caught: u32,
    pub out_of_bounds: u32,
    pub won: bool,
}

impl FrameReport {
    fn absorb(&mut self, report: TickReport) {
        self.ticks += 1;
        self.caught += report.caught;
        self.out_of_bounds += report.out_of_bounds;
        self.won |= report.won;
    }
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    session: Session,
    timers: Timers,
    assets: GameAssets,
}

impl Game {
    /// Create a game with custom tuning; rejects tuning that cannot be played
    pub fn new(seed: u64, tuning: Tuning, assets: GameAssets) -> Result<Self, TuningError> {
        let timers = Timers::new(&tuning);
        let session = Session::new(seed, tuning)?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            session,
            timers,
            assets,
        })
    }

    /// Create a game with the default tuning
    pub fn seeded(seed: u64, assets: GameAssets) -> Self {
        let session = Session::seeded(seed);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            timers: Timers::new(&session.tuning),
            session,
            assets,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn assets(&self) -> &GameAssets {
        &self.assets
    }

    pub fn set_asset(&mut self, slot: AssetSlot, url: impl Into<String>) {
        self.assets.set(slot, url);
    }

    /// Merge partial asset customisation into the current assets
    pub fn customize_assets(&mut self, overrides: AssetOverrides) {
        self.assets = std::mem::take(&mut self.assets).with_overrides(overrides);
    }

    /// Run whatever spawns and ticks are due after `dt_ms` of wall time.
    ///
    /// Spawns are applied before ticks.
    pub fn advance(&mut self, dt_ms: f64) -> FrameReport {
        let fired = self.timers.advance(dt_ms);
        let mut frame = FrameReport::default();

        for _ in 0..fired.spawns {
            if self.spawn().is_some() {
                frame.spawned += 1;
            }
        }
        for _ in 0..fired.ticks {
            frame.absorb(self.tick());
        }

        frame
    }

    pub fn spawn(&mut self) -> Option<u64> {
        spawn_drop(&mut self.session)
    }

    pub fn tick(&mut self) -> TickReport {
        tick(&mut self.session)
    }

    pub fn move_character(&mut self, direction: Direction) {
        move_character(&mut self.session, direction);
    }

    /// Start over; timers restart from zero
    pub fn reset(&mut self) {
        reset_session(&mut self.session);
        self.timers.reset();
        log::info!("Session reset");
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn view_json(&self) -> String {
        // SessionView holds only numbers and bools
        serde_json::to_string(&self.view()).unwrap_or_default()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::seeded(0, GameAssets::default())
    }
}
