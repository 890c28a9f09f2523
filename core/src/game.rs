use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::ChordOutcome;
use crate::{
    Board, BoardGenerator, CellCount, Coord2, GameConfig, GameError, MarkOutcome,
    RandomBoardGenerator, Result, RevealOutcome,
};

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Both ends are terminal; only a reset returns to `Playing`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss.
///
/// Owns the board, the flag budget, and the phase; every mutation flows
/// through the event methods below, processed synchronously and to
/// completion. The board does not exist until the first reveal, which
/// doubles as the guaranteed-safe first click.
///
/// Out-of-bounds coordinates are errors in every phase; everything else
/// a player can do out of turn (clicking a revealed cell, flagging with
/// an empty budget, acting after the game ended) is a silent no-op
/// reported through the returned outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    board: Option<Board>,
    state: GameState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// A game with uniform random mine placement from the given seed.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomBoardGenerator::new(seed))
    }
}

impl<G: BoardGenerator> Game<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            board: None,
            state: GameState::default(),
            started_at: None,
            ended_at: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The board, absent until the first reveal.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.num_mines
    }

    /// Flags still available to place. Starts at the mine count, reaches
    /// 0 on a flag-triggered win, and never goes negative.
    pub fn flags_left(&self) -> CellCount {
        let flagged = self.board.as_ref().map_or(0, Board::flagged_count);
        self.config.num_mines - flagged
    }

    /// Whole seconds since the board came into existence, frozen at the
    /// moment the game ended. 0 before the first click.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Swaps the placement strategy for the next generated board, e.g.
    /// to reseed between games.
    pub fn set_generator(&mut self, generator: G) {
        self.generator = generator;
    }

    /// Discards the board and starts over under the given config.
    pub fn reset(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.board = None;
        self.state = GameState::default();
        self.started_at = None;
        self.ended_at = None;
        log::debug!("reset to {:?}", config);
        Ok(())
    }

    /// Reveals a cell, generating the board first if this is the first
    /// click of the game. A revealed or flagged target is a no-op; a
    /// mine loses on the spot; otherwise the reveal flood-fills and a
    /// cleared board wins.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        self.ensure_board(coords)?;
        let board = self.board.as_mut().expect("board generated above");

        let cell = board.cell_at(coords);
        if cell.is_revealed() || cell.is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine() {
            board.mark_losing_mine(coords);
            board.reveal_all_mines();
            self.finish(GameState::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        board.reveal_cell(coords);
        let cleared = board.is_cleared();
        if cleared {
            self.finish(GameState::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Toggles a flag. Unflagging is always allowed; flagging needs a
    /// positive budget. Flagging the last unflagged mine wins the game
    /// outright, and the board is completed for display: remaining safe
    /// cells revealed, the budget left at 0.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }
        let flags_left = self.flags_left();
        let Some(board) = self.board.as_mut() else {
            return Ok(MarkOutcome::NoChange);
        };

        let cell = board.cell_at(coords);
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        let changed = if cell.is_flagged() {
            board.set_flagged(coords, false)
        } else if flags_left > 0 {
            board.set_flagged(coords, true)
        } else {
            false
        };
        if !changed {
            return Ok(MarkOutcome::NoChange);
        }

        if board.all_mines_flagged() {
            board.finish_flag_win();
            self.finish(GameState::Won);
        }
        Ok(MarkOutcome::Changed)
    }

    /// Chord click on a revealed numbered cell: when its flagged
    /// neighbors match its number, reveals the remaining covered
    /// neighbors. Hitting a mine mid-scan loses immediately with the
    /// rest of the neighbors untouched; otherwise a cleared board wins.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        let Some(board) = self.board.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };

        match board.chord_reveal(coords) {
            ChordOutcome::NoChange => Ok(RevealOutcome::NoChange),
            ChordOutcome::Revealed => {
                let cleared = board.is_cleared();
                if cleared {
                    self.finish(GameState::Won);
                    Ok(RevealOutcome::Won)
                } else {
                    Ok(RevealOutcome::Revealed)
                }
            }
            ChordOutcome::HitMine(mine) => {
                board.mark_losing_mine(mine);
                board.reveal_all_mines();
                self.finish(GameState::Lost);
                Ok(RevealOutcome::HitMine)
            }
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.config.board_size;
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn ensure_board(&mut self, first_click: Coord2) -> Result<()> {
        if self.board.is_none() {
            self.board = Some(self.generator.generate(self.config, first_click)?);
            self.started_at = Some(Utc::now());
            log::debug!("first click at {:?}, board generated", first_click);
        }
        Ok(())
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.ended_at = Some(Utc::now());
        log::debug!("game over: {:?}", state);
    }
}
