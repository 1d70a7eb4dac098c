//! Browser bindings
//!
//! JS owns the canvas, the buttons and the animation frame callback. It calls
//! into `WebGame` for the UI controls and key presses, advances the loop with
//! elapsed time, and pulls the latest frame as JSON to draw.

use wasm_bindgen::prelude::*;

use crate::platform::{LocalStorageStore, direction_for_key};
use crate::scheduler::{Frame, GameLoop, LoopState, RenderSink};
use crate::settings::Settings;

/// Keeps the most recent frame for JS to pull
#[derive(Default)]
struct LatestFrame {
    frame: Option<Frame>,
}

impl RenderSink for LatestFrame {
    fn render(&mut self, frame: &Frame) {
        self.frame = Some(frame.clone());
    }
}

#[wasm_bindgen]
pub struct WebGame {
    inner: GameLoop<LatestFrame>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> WebGame {
        console_error_panic_hook::set_once();
        // Ignore the error if a previous instance already installed the logger
        let _ = console_log::init_with_level(log::Level::Info);

        let mut settings = Settings::default();
        settings.mode = crate::sim::Mode::from_name_or_default(mode);
        settings.seed = Some(js_sys::Date::now() as u64);

        log::info!("Snake Modes starting...");
        WebGame {
            inner: GameLoop::new(settings, Box::new(LocalStorageStore), LatestFrame::default()),
        }
    }

    /// Play button
    pub fn start(&mut self) {
        self.inner.start();
    }

    /// Exit / game over
    pub fn stop(&mut self) {
        self.inner.stop();
    }

    /// Menu button (true) and resume (false)
    pub fn toggle_menu(&mut self, show: bool) {
        self.inner.toggle_menu(show);
    }

    /// Mode radio buttons; takes effect on the next start
    pub fn set_mode(&mut self, mode: &str) {
        self.inner.select_mode_by_name(mode);
    }

    /// Forward a `KeyboardEvent.key`; returns whether it was a direction key
    pub fn key_down(&mut self, key: &str) -> bool {
        match direction_for_key(key) {
            Some(direction) => {
                self.inner.input().push(direction);
                true
            }
            None => false,
        }
    }

    /// Advance by elapsed seconds; returns ticks run
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.inner.advance(dt)
    }

    pub fn is_running(&self) -> bool {
        self.inner.loop_state() == LoopState::Running
    }

    pub fn has_ended(&self) -> bool {
        self.inner.loop_state() == LoopState::Ended
    }

    pub fn best_score(&self) -> u32 {
        self.inner.best_score()
    }

    /// Latest frame as JSON, or an empty string before the first start
    pub fn frame_json(&self) -> String {
        self.inner
            .renderer()
            .frame
            .as_ref()
            .and_then(|frame| serde_json::to_string(frame).ok())
            .unwrap_or_default()
    }
}
