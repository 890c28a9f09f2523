use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Board, Cell, CellCount, Coord, Coord2, GameConfig, GameError, Result, ToGridIndex};

use super::BoardGenerator;

/// Uniform random mine placement with a guaranteed-safe first click.
///
/// Every flat index except the first-click index goes into a candidate
/// list; a Fisher–Yates shuffle of that list supplies the first
/// `num_mines` entries. The first click is excluded deterministically,
/// not merely with high probability, and the placement is uniform
/// without replacement. The same seed always produces the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&self, config: GameConfig, first_click: Coord2) -> Result<Board> {
        let size = config.board_size;
        config.validate()?;
        if first_click.0 >= size || first_click.1 >= size {
            return Err(GameError::InvalidCoords);
        }

        let first_index = first_click.1 as CellCount * size as CellCount + first_click.0 as CellCount;
        let mut candidates: Vec<CellCount> = (0..config.total_cells())
            .filter(|&index| index != first_index)
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (mine_indices, _) = candidates.partial_shuffle(&mut rng, config.num_mines as usize);

        let mut cells: Array2<Cell> = Array2::default((size as usize, size as usize));
        for &index in mine_indices.iter() {
            let x = (index % size as CellCount) as Coord;
            let y = (index / size as CellCount) as Coord;
            cells[(x, y).to_grid_index()].is_mine = true;
        }

        let board = Board::from_cells(cells);
        debug_assert_eq!(board.mine_count(), config.num_mines);
        log::debug!(
            "generated {0}x{0} board with {1} mines, first click {2:?}",
            size,
            board.mine_count(),
            first_click
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..20 {
            let generator = RandomBoardGenerator::new(seed);
            let board = generator.generate(GameConfig::easy(), (4, 7)).unwrap();

            let mines = board.iter().filter(|(_, cell)| cell.is_mine()).count();
            assert_eq!(mines as CellCount, GameConfig::easy().num_mines);
        }
    }

    #[test]
    fn first_click_is_never_a_mine() {
        // Saturate a tiny board so every other cell must be a mine.
        let config = GameConfig::new(3, 8).unwrap();
        for seed in 0..20 {
            let generator = RandomBoardGenerator::new(seed);
            let board = generator.generate(config, (1, 1)).unwrap();

            assert!(!board.cell_at((1, 1)).is_mine());
            let mines = board.iter().filter(|(_, cell)| cell.is_mine()).count();
            assert_eq!(mines, 8);
        }
    }

    #[test]
    fn same_seed_same_board() {
        let a = RandomBoardGenerator::new(42)
            .generate(GameConfig::medium(), (0, 15))
            .unwrap();
        let b = RandomBoardGenerator::new(42)
            .generate(GameConfig::medium(), (0, 15))
            .unwrap();
        assert_eq!(a, b);

        let c = RandomBoardGenerator::new(43)
            .generate(GameConfig::medium(), (0, 15))
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn zero_mines_is_a_valid_board() {
        let board = RandomBoardGenerator::new(7)
            .generate(GameConfig::new(4, 0).unwrap(), (2, 2))
            .unwrap();
        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.safe_cell_count(), 16);
    }

    #[test]
    fn single_cell_board_is_safe() {
        let board = RandomBoardGenerator::new(7)
            .generate(GameConfig::new(1, 0).unwrap(), (0, 0))
            .unwrap();
        assert!(!board.cell_at((0, 0)).is_mine());
    }

    #[test]
    fn out_of_bounds_first_click_is_rejected() {
        let generator = RandomBoardGenerator::new(0);
        assert_eq!(
            generator.generate(GameConfig::trivial(), (3, 0)),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let generator = RandomBoardGenerator::new(0);
        assert_eq!(
            generator.generate(GameConfig::new_unchecked(3, 9), (0, 0)),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            generator.generate(GameConfig::new_unchecked(0, 0), (0, 0)),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn adjacency_matches_a_full_recount() {
        let board = RandomBoardGenerator::new(99)
            .generate(GameConfig::easy(), (5, 5))
            .unwrap();

        for (pos, cell) in board.iter() {
            if cell.is_mine() {
                continue;
            }
            let expected = crate::neighbors(pos, board.size())
                .filter(|&n| board.cell_at(n).is_mine())
                .count() as u8;
            assert_eq!(cell.adjacent_mines(), expected, "mismatch at {pos:?}");
        }
    }
}
