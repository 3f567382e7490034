//! Browser bindings
//!
//! `WebGame` exposes the core to a JS renderer. `mount` wires the core to
//! the page itself: two interval timers, keyboard and swipe input, and a
//! minimal DOM view drawn with the game's assets. Every registration is held
//! by a guard that releases it on drop, so dropping [`Mounted`] stops the
//! game cleanly.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, KeyboardEvent, TouchEvent};

use super::input::{SwipeTracker, direction_for_key};
use crate::assets::{AssetOverrides, AssetSlot, GameAssets, css_url};
use crate::game::Game;
use crate::sim::Direction;
use crate::tuning::Tuning;

fn js_err(msg: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&msg.to_string())
}

/// The game core as seen from JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        WebGame {
            game: Game::seeded(seed as u64, GameAssets::default()),
        }
    }

    /// Create a game from a JSON tuning document
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<WebGame, JsValue> {
        let game = Tuning::from_json(tuning_json)
            .and_then(|tuning| Game::new(seed as u64, tuning, GameAssets::default()))
            .map_err(|e| {
                log::warn!("Rejected tuning: {}", e);
                js_err(e)
            })?;
        Ok(WebGame { game })
    }

    /// Spawn a drop; false once the session is over
    pub fn spawn(&mut self) -> bool {
        self.game.spawn().is_some()
    }

    /// Run one tick and return the number of drops caught
    pub fn tick(&mut self) -> u32 {
        self.game.tick().caught
    }

    /// Feed elapsed milliseconds to the internal timers
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.game.advance(dt_ms).caught
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.game.move_character(Direction::Left);
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.game.move_character(Direction::Right);
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Current session view as JSON
    pub fn snapshot(&self) -> String {
        self.game.view_json()
    }

    /// Replace one asset slot; false for an unknown slot name
    #[wasm_bindgen(js_name = setAsset)]
    pub fn set_asset(&mut self, slot: &str, url: &str) -> bool {
        match AssetSlot::from_str(slot) {
            Some(slot) => {
                self.game.set_asset(slot, url);
                true
            }
            None => false,
        }
    }

    /// Merge a partial asset JSON document
    #[wasm_bindgen(js_name = setAssets)]
    pub fn set_assets(&mut self, overrides_json: &str) -> Result<(), JsValue> {
        let overrides: AssetOverrides = serde_json::from_str(overrides_json).map_err(js_err)?;
        self.game.customize_assets(overrides);
        Ok(())
    }

    pub fn assets(&self) -> String {
        serde_json::to_string(self.game.assets()).unwrap_or_default()
    }
}

/// A `setInterval` registration, cleared on drop
pub struct IntervalGuard {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalGuard {
    pub fn new(period_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let timeout = i32::try_from(period_ms)
            .map_err(|_| js_err(format!("interval of {} ms is too long", period_ms)))?;
        let closure = Closure::<dyn FnMut()>::new(callback);
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout,
        )?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for IntervalGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// An event listener registration, removed on drop
pub struct ListenerGuard {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerGuard {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// A game attached to the page. Dropping it stops timers and input.
pub struct Mounted {
    pub game: Rc<RefCell<Game>>,
    document: Document,
    _intervals: Vec<IntervalGuard>,
    _listeners: Vec<ListenerGuard>,
}

impl Mounted {
    /// Replace one asset slot and redraw; false for an unknown slot name
    pub fn set_asset(&self, slot: &str, url: &str) -> bool {
        let Some(slot) = AssetSlot::from_str(slot) else {
            log::warn!("Unknown asset slot: {}", slot);
            return false;
        };
        self.game.borrow_mut().set_asset(slot, url);
        self.redraw();
        true
    }

    /// Merge a partial asset JSON document and redraw
    pub fn customize_assets(&self, overrides_json: &str) -> Result<(), JsValue> {
        let overrides: AssetOverrides = serde_json::from_str(overrides_json).map_err(js_err)?;
        self.game.borrow_mut().customize_assets(overrides);
        self.redraw();
        Ok(())
    }

    pub fn redraw(&self) {
        render(&self.document, &self.game.borrow());
    }
}

/// Attach a game to the page's `#field`, `#score`, `#counter`, `#character`,
/// `#basket`, `#drops`, `#win-overlay`, `#win-image`, `#move-left`,
/// `#move-right` and `#play-again` elements. Missing optional elements are
/// skipped.
pub fn mount(seed: u64, tuning: Tuning, assets: GameAssets) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    let spawn_period = tuning.spawn_period_ms;
    let tick_period = tuning.tick_period_ms;
    let game = Game::new(seed, tuning, assets).map_err(|e| {
        log::error!("Cannot mount: {}", e);
        js_err(e)
    })?;
    let game = Rc::new(RefCell::new(game));

    let mut intervals = Vec::with_capacity(2);
    {
        let game = game.clone();
        intervals.push(IntervalGuard::new(spawn_period, move || {
            game.borrow_mut().spawn();
        })?);
    }
    {
        let game = game.clone();
        let document = document.clone();
        intervals.push(IntervalGuard::new(tick_period, move || {
            game.borrow_mut().tick();
            render(&document, &game.borrow());
        })?);
    }

    let mut listeners = Vec::new();

    // Keyboard
    {
        let game = game.clone();
        listeners.push(ListenerGuard::new(&window, "keydown", move |event| {
            if let Some(direction) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|e| direction_for_key(&e.key()))
            {
                game.borrow_mut().move_character(direction);
            }
        })?);
    }

    // Swipe on the play field
    if let Some(field) = document.get_element_by_id("field") {
        let swipe = Rc::new(RefCell::new(SwipeTracker::new()));
        {
            let swipe = swipe.clone();
            listeners.push(ListenerGuard::new(&field, "touchstart", move |event| {
                if let Some(x) = first_touch_x(&event) {
                    swipe.borrow_mut().begin(x);
                }
            })?);
        }
        {
            let swipe = swipe.clone();
            let game = game.clone();
            listeners.push(ListenerGuard::new(&field, "touchmove", move |event| {
                let direction = first_touch_x(&event).and_then(|x| swipe.borrow_mut().moved(x));
                if let Some(direction) = direction {
                    game.borrow_mut().move_character(direction);
                }
            })?);
        }
        listeners.push(ListenerGuard::new(&field, "touchend", move |_event| {
            swipe.borrow_mut().end();
        })?);
    }

    // On-screen buttons
    for (id, direction) in [("move-left", Direction::Left), ("move-right", Direction::Right)] {
        if let Some(button) = document.get_element_by_id(id) {
            let game = game.clone();
            listeners.push(ListenerGuard::new(&button, "click", move |_event| {
                game.borrow_mut().move_character(direction);
            })?);
        }
    }
    if let Some(button) = document.get_element_by_id("play-again") {
        let game = game.clone();
        let document = document.clone();
        listeners.push(ListenerGuard::new(&button, "click", move |_event| {
            game.borrow_mut().reset();
            render(&document, &game.borrow());
        })?);
    }

    render(&document, &game.borrow());
    log::info!("Mounted with {} timers, {} listeners", intervals.len(), listeners.len());

    Ok(Mounted {
        game,
        document,
        _intervals: intervals,
        _listeners: listeners,
    })
}

fn first_touch_x(event: &web_sys::Event) -> Option<f32> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(touch.client_x() as f32)
}

/// Write the game's view and assets into the page
fn render(document: &Document, game: &Game) {
    let view = game.view();
    let assets = game.assets();

    if let Some(el) = document.get_element_by_id("field") {
        let _ = el.set_attribute(
            "style",
            &format!("background-image: {}", css_url(&assets.background)),
        );
    }

    if let Some(el) = document.get_element_by_id("score") {
        el.set_text_content(Some(&format!("Score: {}", view.score)));
    }

    if let Some(el) = document.get_element_by_id("counter") {
        let pips: String = view
            .counter_slots()
            .iter()
            .map(|filled| if *filled { '\u{25cf}' } else { '\u{25cb}' })
            .collect();
        el.set_text_content(Some(&pips));
    }

    if let Some(el) = document.get_element_by_id("character") {
        let _ = el.set_attribute(
            "style",
            &format!(
                "left: {}%; background-image: {}",
                view.character_position,
                css_url(&assets.character)
            ),
        );
    }

    if let Some(el) = document.get_element_by_id("basket") {
        let _ = el.set_attribute("style", &format!("background-image: {}", css_url(&assets.basket)));
    }

    if let Some(el) = document.get_element_by_id("drops") {
        let image = css_url(&assets.drop);
        let html: String = view
            .drops
            .iter()
            .map(|d| {
                format!(
                    r#"<div class="drop" data-id="{}" style='left: {}%; top: {}%; background-image: {}'></div>"#,
                    d.id, d.x, d.y, image
                )
            })
            .collect();
        el.set_inner_html(&html);
    }

    if let Some(el) = document.get_element_by_id("win-image") {
        if el.get_attribute("src").as_deref() != Some(assets.win_screen.as_str()) {
            let _ = el.set_attribute("src", &assets.win_screen);
        }
    }

    if let Some(el) = document.get_element_by_id("win-overlay") {
        set_visible(&el, view.is_over);
    }
}

fn set_visible(el: &Element, visible: bool) {
    let _ = el.class_list().toggle_with_force("visible", visible);
}
