//! Minesweeper board engine: generation with a safe first click,
//! flood-fill reveal, chord resolution, dual win policies, and a
//! synchronous event-driven game state machine.
//!
//! The crate is UI-agnostic. A consuming layer feeds coordinates into
//! [`Game::reveal`], [`Game::toggle_flag`], and [`Game::chord`], checks
//! the returned outcome's `has_update()` to decide whether to re-render,
//! and reads the board back through [`Game::board`].

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod types;

/// Board side length and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board_size: Coord,
    pub num_mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(board_size: Coord, num_mines: CellCount) -> Self {
        Self {
            board_size,
            num_mines,
        }
    }

    /// A validated config: positive board size, and at least one safe
    /// cell so the first click can always be excluded from placement.
    pub fn new(board_size: Coord, num_mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(board_size, num_mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board_size == 0 || self.num_mines >= self.total_cells() {
            Err(GameError::InvalidConfig)
        } else {
            Ok(())
        }
    }

    pub const fn trivial() -> Self {
        Self::new_unchecked(3, 2)
    }

    pub const fn easy() -> Self {
        Self::new_unchecked(10, 10)
    }

    pub const fn medium() -> Self {
        Self::new_unchecked(16, 40)
    }

    pub const fn hard() -> Self {
        Self::new_unchecked(24, 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_area(self.board_size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.num_mines
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing or chording.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
