use serde::{Deserialize, Serialize};

use crate::{Board, Coord2, GameConfig, GameError, Result};

use super::BoardGenerator;

/// Places mines at fixed coordinates, for deterministic tests and
/// reproducible puzzle layouts.
///
/// The layout is taken as-is: first-click safety is the caller's
/// responsibility here, and the coordinate list must match the config's
/// board size and mine count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetBoardGenerator {
    mine_coords: Vec<Coord2>,
}

impl PresetBoardGenerator {
    pub fn new(mine_coords: Vec<Coord2>) -> Self {
        Self { mine_coords }
    }
}

impl BoardGenerator for PresetBoardGenerator {
    fn generate(&self, config: GameConfig, first_click: Coord2) -> Result<Board> {
        config.validate()?;
        if first_click.0 >= config.board_size || first_click.1 >= config.board_size {
            return Err(GameError::InvalidCoords);
        }

        let board = Board::from_mine_coords(config.board_size, &self.mine_coords)?;
        if board.mine_count() != config.num_mines {
            return Err(GameError::InvalidConfig);
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_exact_layout() {
        let generator = PresetBoardGenerator::new(vec![(0, 0), (2, 1)]);
        let board = generator.generate(GameConfig::trivial(), (2, 2)).unwrap();

        assert!(board.cell_at((0, 0)).is_mine());
        assert!(board.cell_at((2, 1)).is_mine());
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn mine_count_must_match_the_config() {
        let generator = PresetBoardGenerator::new(vec![(0, 0)]);
        assert_eq!(
            generator.generate(GameConfig::trivial(), (2, 2)),
            Err(GameError::InvalidConfig)
        );
    }
}
