use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod types;

pub use bindings::PuzzleGame;
pub use board::{Board, TARGET_ARRANGEMENT, Tile, TileId};
pub use config::GameConfig;
pub use error::GameError;
pub use game::PuzzleEngine;
pub use types::{GameEvent, GameSnapshot, Phase, SelectOutcome};

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
