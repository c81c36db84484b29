use std::fmt;

use serde::Serialize;

use crate::board::{Tile, TileId};

/// Screen the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Entry,
    Puzzle,
    /// Unlock gate shown over the solved puzzle.
    Treasure,
    Map,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Entry => "entry",
            Phase::Puzzle => "puzzle",
            Phase::Treasure => "treasure",
            Phase::Map => "map",
        };
        f.write_str(name)
    }
}

/// One grid cell as the presentation layer draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub id: u8,
    /// Number printed on the tile (`id + 1`).
    pub label: u8,
    pub position: u8,
    pub row: u8,
    pub col: u8,
    pub slice_row: u8,
    pub slice_col: u8,
    /// Negative CSS background offset, in percent, for a 300% sized image.
    pub background_x: u8,
    pub background_y: u8,
    pub selected: bool,
}

impl TileView {
    pub fn new(tile: &Tile, selected: Option<TileId>) -> Self {
        let (row, col) = tile.cell();
        let (slice_row, slice_col) = tile.slice();
        Self {
            id: tile.id.get(),
            label: tile.id.get() + 1,
            position: tile.current_position,
            row,
            col,
            slice_row,
            slice_col,
            background_x: slice_col * 50,
            background_y: slice_row * 50,
            selected: selected == Some(tile.id),
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    /// Contract: ordered by grid position, so `tiles[p].position == p`.
    pub tiles: Vec<TileView>,
    /// Position -> 1-based tile number.
    pub arrangement: Vec<u8>,
    pub selected: Option<u8>,
    pub is_complete: bool,
    pub elapsed_seconds: u32,
    pub elapsed_display: String,
    /// `true` while the solve is waiting for the unlock gate to appear.
    pub reveal_pending: bool,
    pub venue_open: bool,
}

/// Notifications queued for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    /// Fired once per solve.
    #[serde(rename_all = "camelCase")]
    Solved { elapsed_seconds: u32 },
    UnlockGateShown,
    Unlocked,
}

/// Result of a tile selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectOutcome {
    Selected { id: TileId },
    Deselected { id: TileId },
    /// Contract: `solved` is `true` only for the swap that completed the puzzle.
    Swapped {
        first: TileId,
        second: TileId,
        solved: bool,
    },
    /// Selection is disabled once the puzzle is complete.
    Ignored,
}

/// `m:ss`, minutes unpadded.
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
