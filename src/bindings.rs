use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::PuzzleEngine;
use crate::logging;

/// Game handle owned by the page script. Every intent the page can send is
/// a method here; the page re-renders from `state()` afterwards.
#[wasm_bindgen]
pub struct PuzzleGame {
    engine: PuzzleEngine,
}

#[wasm_bindgen]
impl PuzzleGame {
    /// Accepts `undefined` or a partial `{ revealDelayMs, logLevel }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PuzzleGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<GameConfig>(config)
                .map_err(|err| JsError::new(&format!("invalid game config: {err}")))?
        };
        logging::init(config.log_level);

        Ok(PuzzleGame {
            engine: PuzzleEngine::with_defaults(config),
        })
    }

    pub fn start(&mut self) -> Result<(), JsError> {
        self.engine.start()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = selectTile)]
    pub fn select_tile(&mut self, id: u8) -> Result<JsValue, JsError> {
        let outcome = self.engine.select(id)?;
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = requestShuffle)]
    pub fn request_shuffle(&mut self) -> Result<(), JsError> {
        self.engine.shuffle()?;
        Ok(())
    }

    /// `false` for a wrong code; the page clears the input and lets the
    /// player try again.
    #[wasm_bindgen(js_name = submitCode)]
    pub fn submit_code(&mut self, code: &str) -> Result<bool, JsError> {
        match self.engine.unlock(code) {
            Ok(()) => Ok(true),
            Err(GameError::WrongCode) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    #[wasm_bindgen(js_name = requestReset)]
    pub fn request_reset(&mut self) {
        self.engine.reset();
    }

    #[wasm_bindgen(js_name = requestExit)]
    pub fn request_exit(&self, confirmed: bool) -> bool {
        self.engine.request_exit(confirmed)
    }

    /// Call about once a second; returns the elapsed seconds.
    pub fn tick(&mut self) -> u32 {
        self.engine.tick()
    }

    #[wasm_bindgen(js_name = showVenue)]
    pub fn show_venue(&mut self) -> Result<(), JsError> {
        self.engine.show_venue()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = hideVenue)]
    pub fn hide_venue(&mut self) {
        self.engine.hide_venue();
    }

    pub fn phase(&self) -> String {
        self.engine.phase().to_string()
    }

    #[wasm_bindgen(js_name = elapsedDisplay)]
    pub fn elapsed_display(&self) -> String {
        self.engine.elapsed_display()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.engine.snapshot())
    }

    #[wasm_bindgen(js_name = takeEvents)]
    pub fn take_events(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.engine.take_events())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
