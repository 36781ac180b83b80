//! Browser-facing API over a single game session.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::GameInstance;
use crate::persist::SaveRecord;

static SESSION: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

fn js_err(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_config(config: JsValue) -> Result<EngineConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EngineConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(js_err)
}

fn with_session<T>(f: impl FnOnce(&mut GameInstance) -> Result<T, EngineError>) -> Result<T, JsValue> {
    let mut guard = SESSION.lock().map_err(|_| js_err("session lock poisoned"))?;
    let game = guard.as_mut().ok_or_else(|| js_err("no game in progress"))?;
    f(game).map_err(js_err)
}

fn install(game: GameInstance) -> Result<JsValue, JsValue> {
    let state = game.to_game_state();
    let mut guard = SESSION.lock().map_err(|_| js_err("session lock poisoned"))?;
    *guard = Some(game);
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Starts a fresh game. `config` may be `undefined` or a partial `EngineConfig` object.
#[wasm_bindgen]
pub fn start_game(player_name: String, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    install(GameInstance::new(player_name, config).map_err(js_err)?)
}

/// Restores a game from save-file text.
#[wasm_bindgen]
pub fn load_game(text: String, config: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_config(config)?;
    let record = SaveRecord::parse(&text).map_err(js_err)?;
    install(GameInstance::from_record(record, config).map_err(js_err)?)
}

/// Save-file text for the current game.
#[wasm_bindgen]
pub fn save_game() -> Result<String, JsValue> {
    with_session(|game| Ok(game.save_record().to_text()))
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_session(|game| Ok(game.to_game_state()))?;
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    let moves = with_session(|game| Ok(game.legal_moves()))?;
    serde_wasm_bindgen::to_value(&moves).map_err(js_err)
}

#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let state = with_session(|game| {
        game.place(row as usize, col as usize)?;
        Ok(game.to_game_state())
    })?;
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}

#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    let state = with_session(|game| {
        game.computer_move()?;
        Ok(game.to_game_state())
    })?;
    serde_wasm_bindgen::to_value(&state).map_err(js_err)
}

/// Final result, or `undefined` while the game is running.
#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    let result = with_session(|game| Ok(game.to_game_result()))?;
    serde_wasm_bindgen::to_value(&result).map_err(js_err)
}

/// The `name: score` line to append to the score log, or `undefined` while the game is running.
#[wasm_bindgen]
pub fn score_entry() -> Result<Option<String>, JsValue> {
    with_session(|game| Ok(game.score_entry().map(|entry| entry.to_string())))
}

#[wasm_bindgen]
pub fn computer_delay_ms() -> Result<u32, JsValue> {
    with_session(|game| Ok(game.config().computer_delay_ms))
}
