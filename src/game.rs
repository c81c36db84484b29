use std::time::Duration;

use log::{debug, info, warn};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, TileId};
use crate::clock::{Clock, Stopwatch, SystemClock};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::types::{GameEvent, GameSnapshot, Phase, SelectOutcome, TileView, format_elapsed};

pub const SECRET_CODE: &str = "INFYRA";

/// `true` when `input` equals the secret code, ignoring case and surrounding whitespace.
pub fn code_matches(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(SECRET_CODE)
}

pub struct PuzzleEngine {
    board: Board,
    phase: Phase,
    is_complete: bool,
    selected: Option<TileId>,
    stopwatch: Stopwatch,
    elapsed_seconds: u32,
    reveal_at: Option<Duration>,
    venue_open: bool,
    events: Vec<GameEvent>,
    config: GameConfig,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
}

impl PuzzleEngine {
    pub fn new(config: GameConfig, clock: Box<dyn Clock>, rng: Box<dyn RngCore>) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Entry,
            is_complete: false,
            selected: None,
            stopwatch: Stopwatch::new(),
            elapsed_seconds: 0,
            reveal_at: None,
            venue_open: false,
            events: Vec::new(),
            config,
            clock,
            rng,
        }
    }

    /// Engine on the wall clock with an entropy-seeded rng.
    pub fn with_defaults(config: GameConfig) -> Self {
        Self::new(
            config,
            Box::new(SystemClock::new()),
            Box::new(ChaCha8Rng::from_entropy()),
        )
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    pub fn venue_open(&self) -> bool {
        self.venue_open
    }

    /// Puts every tile back on its own slice position.
    fn initialize(&mut self) {
        self.board = Board::new();
        self.selected = None;
    }

    /// Leaves the entry screen, starts the timer and deals a shuffled board.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Entry, "start the puzzle")?;

        self.set_phase(Phase::Puzzle);
        self.stopwatch.reset();
        self.elapsed_seconds = 0;
        self.stopwatch.start(self.clock.now());
        self.shuffle()
    }

    pub fn shuffle(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Puzzle, "shuffle")?;

        self.board.shuffle(&mut self.rng);
        self.selected = None;
        self.reveal_at = None;
        if self.is_complete {
            self.is_complete = false;
            self.stopwatch.start(self.clock.now());
        }
        debug!("shuffled board: {:?}", self.board.arrangement());
        Ok(())
    }

    pub fn select(&mut self, id: u8) -> Result<SelectOutcome, GameError> {
        let tile = TileId::new(id).ok_or(GameError::UnknownTile(id))?;

        // The solved board stays on screen behind the unlock gate.
        if self.is_complete && matches!(self.phase, Phase::Puzzle | Phase::Treasure) {
            return Ok(SelectOutcome::Ignored);
        }
        self.require_phase(Phase::Puzzle, "select a tile")?;

        let outcome = match self.selected {
            None => {
                self.selected = Some(tile);
                SelectOutcome::Selected { id: tile }
            }
            Some(current) if current == tile => {
                self.selected = None;
                SelectOutcome::Deselected { id: tile }
            }
            Some(current) => {
                self.swap(current, tile);
                self.selected = None;
                // Not complete before this swap, so a match is a fresh solve.
                let solved = self.check_completion();
                SelectOutcome::Swapped {
                    first: current,
                    second: tile,
                    solved,
                }
            }
        };
        debug!("select {id}: {outcome:?}");
        Ok(outcome)
    }

    pub fn swap(&mut self, a: TileId, b: TileId) {
        self.board.swap(a, b);
    }

    /// Compares the board with the target arrangement. The first match
    /// completes the puzzle: the timer freezes and the gate reveal is scheduled.
    pub fn check_completion(&mut self) -> bool {
        let matches = self.board.matches_target();
        if matches && !self.is_complete {
            let now = self.clock.now();
            self.stopwatch.stop(now);
            self.elapsed_seconds = whole_seconds(self.stopwatch.elapsed(now));
            self.is_complete = true;
            self.selected = None;
            self.reveal_at = Some(now + self.config.reveal_delay());
            self.events.push(GameEvent::Solved {
                elapsed_seconds: self.elapsed_seconds,
            });
            info!("puzzle solved in {}", self.elapsed_display());
        }
        matches
    }

    /// Advances time-driven state. Returns the elapsed seconds after the tick.
    pub fn tick(&mut self) -> u32 {
        let now = self.clock.now();

        if self.phase == Phase::Puzzle && !self.is_complete {
            self.elapsed_seconds = whole_seconds(self.stopwatch.elapsed(now));
        }

        if let Some(due) = self.reveal_at
            && now >= due
        {
            self.reveal_at = None;
            self.set_phase(Phase::Treasure);
            self.events.push(GameEvent::UnlockGateShown);
        }

        self.elapsed_seconds
    }

    /// Checks a code entered at the unlock gate. Wrong codes can be retried
    /// without limit; the right one moves on to the map for good.
    pub fn unlock(&mut self, code: &str) -> Result<(), GameError> {
        if !matches!(self.phase, Phase::Puzzle | Phase::Treasure) {
            return Err(GameError::WrongPhase {
                action: "unlock the treasure",
                phase: self.phase,
            });
        }
        if !self.is_complete {
            return Err(GameError::NotSolved);
        }
        if !code_matches(code) {
            warn!("rejected unlock code");
            return Err(GameError::WrongCode);
        }

        self.reveal_at = None;
        self.set_phase(Phase::Map);
        self.events.push(GameEvent::Unlocked);
        Ok(())
    }

    /// "Play again": fresh identity board back on the entry screen.
    pub fn reset(&mut self) {
        self.initialize();
        self.is_complete = false;
        self.stopwatch.reset();
        self.elapsed_seconds = 0;
        self.reveal_at = None;
        self.venue_open = false;
        self.events.clear();
        self.set_phase(Phase::Entry);
    }

    /// Returns whether the host should close the game. Declining changes nothing.
    pub fn request_exit(&self, confirmed: bool) -> bool {
        if confirmed {
            info!("exit confirmed during the {} phase", self.phase);
        }
        confirmed
    }

    pub fn show_venue(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Map, "open the venue details")?;
        self.venue_open = true;
        Ok(())
    }

    pub fn hide_venue(&mut self) {
        self.venue_open = false;
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut tiles: Vec<TileView> = self
            .board
            .tiles()
            .iter()
            .map(|tile| TileView::new(tile, self.selected))
            .collect();
        tiles.sort_by_key(|view| view.position);

        GameSnapshot {
            phase: self.phase,
            tiles,
            arrangement: self.board.arrangement().to_vec(),
            selected: self.selected.map(TileId::get),
            is_complete: self.is_complete,
            elapsed_seconds: self.elapsed_seconds,
            elapsed_display: self.elapsed_display(),
            reveal_pending: self.reveal_at.is_some(),
            venue_open: self.venue_open,
        }
    }

    fn require_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("phase {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.selected = None;
    }
}

fn whole_seconds(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX)
}
