use crate::{Board, Coord2, GameConfig, Result};

pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Strategy for producing the board at the first click.
///
/// Implementations validate the config and the first-click position
/// before building anything, so a failed call leaves no board behind.
pub trait BoardGenerator {
    fn generate(&self, config: GameConfig, first_click: Coord2) -> Result<Board>;
}
