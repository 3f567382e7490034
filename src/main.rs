//! Rain Catch entry point
//!
//! On the web this mounts the game onto the page. Natively it plays a seeded
//! headless session with a basket that chases the lowest drop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use rain_catch::platform::web::{Mounted, mount};
    use rain_catch::{GameAssets, Tuning};

    thread_local! {
        static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    }

    fn page_assets() -> GameAssets {
        GameAssets {
            background: "/Background.png".into(),
            character: "/Mouse.png".into(),
            basket: "/Basket.png".into(),
            drop: "/Sparkle.png".into(),
            win_screen: "/Message.png".into(),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Rain Catch starting...");

        let seed = js_sys::Date::now() as u64;
        let mounted = mount(seed, Tuning::default(), page_assets())?;
        MOUNTED.with(|m| *m.borrow_mut() = Some(mounted));

        log::info!("Rain Catch running!");
        Ok(())
    }

    /// Replace one asset on the running game; false if nothing is mounted
    /// or the slot name is unknown
    pub fn set_asset(slot: &str, url: &str) -> bool {
        MOUNTED.with(|m| {
            m.borrow()
                .as_ref()
                .is_some_and(|mounted| mounted.set_asset(slot, url))
        })
    }

    /// Merge a partial asset JSON document into the running game
    pub fn set_assets(overrides_json: &str) -> Result<(), JsValue> {
        MOUNTED.with(|m| match m.borrow().as_ref() {
            Some(mounted) => mounted.customize_assets(overrides_json),
            None => Err(JsValue::from_str("game is not mounted")),
        })
    }

    /// Stop timers and input listeners
    pub fn unmount() {
        MOUNTED.with(|m| {
            if m.borrow_mut().take().is_some() {
                log::info!("Rain Catch unmounted");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = setAsset)]
pub fn set_asset(slot: &str, url: &str) -> bool {
    wasm_game::set_asset(slot, url)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = setAssets)]
pub fn set_assets(overrides_json: &str) -> Result<(), JsValue> {
    wasm_game::set_assets(overrides_json)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_game::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rain_catch::sim::Direction;
    use rain_catch::{Game, GameAssets, Tuning, TuningPreset};

    env_logger::init();
    log::info!("Rain Catch (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let tuning = args
        .next()
        .and_then(|s| TuningPreset::from_str(&s))
        .map(Tuning::from_preset)
        .unwrap_or_default();

    let frame_ms = f64::from(tuning.tick_period_ms);
    let basket_offset = tuning.basket_offset;
    let step = tuning.move_step;
    let mut game = match Game::new(seed, tuning, GameAssets::default()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return;
        }
    };

    // Ten simulated minutes at most
    let max_frames = 10 * 60 * 1000 / frame_ms as u64;
    for frame in 0..max_frames {
        // Chase the lowest drop
        let target = game
            .session()
            .drops
            .iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|d| d.x - basket_offset);
        if let Some(target) = target {
            let position = game.session().character_position;
            if target < position - step / 2.0 {
                game.move_character(Direction::Left);
            } else if target > position + step / 2.0 {
                game.move_character(Direction::Right);
            }
        }

        let report = game.advance(frame_ms);
        if report.caught > 0 {
            println!("frame {:>5}: caught {} -> score {}", frame, report.caught, game.view().score);
        }
        if report.won {
            println!(
                "Won after {:.1}s of play",
                frame as f64 * frame_ms / 1000.0
            );
            return;
        }
    }

    println!("Time's up with score {}", game.view().score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
