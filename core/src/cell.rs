use serde::{Deserialize, Serialize};

/// Player-visible state of one board square.
///
/// `is_mine` and `adjacent_mines` are fixed at generation; `is_revealed`
/// only ever goes from false to true; `is_flagged` toggles while the cell
/// stays unrevealed. Mines keep `adjacent_mines` at its default 0, which
/// is never shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) is_losing_mine: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mines in the Chebyshev neighborhood, in `0..=8`.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// True only on the mine whose reveal ended the game.
    pub const fn is_losing_mine(&self) -> bool {
        self.is_losing_mine
    }

    /// Whether the cell still reads as covered to the player.
    pub const fn is_hidden(&self) -> bool {
        !self.is_revealed
    }
}
