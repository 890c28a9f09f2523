use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    Cell, CellCount, Coord, Coord2, GameError, Result, ToGridIndex, cell_area, neighbors,
};

/// A generated minefield plus the player-visible state of every cell.
///
/// Cells live in a row-major square grid; the flat position of `(x, y)`
/// is `y * size + x`. `revealed_count` counts safe cells only, so the
/// clearing-win predicate stays O(1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

/// What a chord click did to the board.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum ChordOutcome {
    NoChange,
    Revealed,
    HitMine(Coord2),
}

impl Board {
    /// Builds a board with mines at exactly the given coordinates.
    ///
    /// Duplicate coordinates collapse into one mine. Useful for tests and
    /// fixed puzzle layouts; no first-click safety is applied here.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidConfig);
        }

        let mut cells: Array2<Cell> = Array2::default((size as usize, size as usize));
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_grid_index()].is_mine = true;
        }

        Ok(Self::from_cells(cells))
    }

    /// Finishes a grid whose mines are already placed: counts them and
    /// fills in `adjacent_mines` for every safe cell.
    pub(crate) fn from_cells(mut cells: Array2<Cell>) -> Self {
        let size: Coord = cells.dim().0.try_into().expect("board side fits Coord");
        let mine_count = cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .expect("mine count fits CellCount");

        for y in 0..size {
            for x in 0..size {
                if cells[(x, y).to_grid_index()].is_mine {
                    continue;
                }
                let count = neighbors((x, y), size)
                    .filter(|&pos| cells[pos.to_grid_index()].is_mine)
                    .count() as u8;
                cells[(x, y).to_grid_index()].adjacent_mines = count;
            }
        }

        Self {
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().expect("board side fits Coord")
    }

    pub fn total_cells(&self) -> CellCount {
        cell_area(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub(crate) fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// The cell at `coords`. Panics if `coords` is out of bounds; event
    /// entry points validate coordinates before getting here.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_grid_index()]
    }

    /// All cells with their coordinates, row-major (generation order).
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// True iff every safe cell is revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    /// True iff every mine carries a flag.
    pub fn all_mines_flagged(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_mine || cell.is_flagged)
    }

    pub(crate) fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        neighbors(coords, self.size())
            .filter(|&pos| self.cells[pos.to_grid_index()].is_flagged)
            .count() as u8
    }

    /// Reveals a safe cell, flood-filling outward across the connected
    /// zero-adjacency region and its numbered border. Returns whether
    /// anything changed.
    ///
    /// Revealed, flagged, and mine cells are left untouched; the caller
    /// handles mine hits before revealing. The worklist is explicit and
    /// the `is_revealed` flag doubles as the visited guard, so each cell
    /// is processed at most once and large boards cannot exhaust the
    /// stack.
    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> bool {
        let size = self.size();
        let cell = self.cells[coords.to_grid_index()];
        if cell.is_revealed || cell.is_flagged || cell.is_mine {
            return false;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(pos) = to_visit.pop_front() {
            let cell = &mut self.cells[pos.to_grid_index()];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }

            cell.is_revealed = true;
            self.revealed_count += 1;
            log::trace!("revealed {:?}, adjacent mines: {}", pos, cell.adjacent_mines);

            // A zero cell has no adjacent mines, so the expansion can
            // never enqueue one.
            if cell.adjacent_mines == 0 {
                to_visit.extend(
                    neighbors(pos, size)
                        .filter(|&next| self.cells[next.to_grid_index()].is_hidden()),
                );
            }
        }

        true
    }

    /// Resolves a chord click on a revealed numbered cell.
    ///
    /// Only acts when the flagged-neighbor count matches the cell's
    /// number exactly; then every unflagged covered neighbor is revealed
    /// in row-major order, stopping at the first mine found. Neighbors
    /// after a mine hit stay untouched.
    pub(crate) fn chord_reveal(&mut self, coords: Coord2) -> ChordOutcome {
        let cell = self.cells[coords.to_grid_index()];
        if !cell.is_revealed || cell.adjacent_mines == 0 {
            return ChordOutcome::NoChange;
        }
        if self.count_flagged_neighbors(coords) != cell.adjacent_mines {
            return ChordOutcome::NoChange;
        }

        let mut changed = false;
        for pos in neighbors(coords, self.size()) {
            let neighbor = self.cells[pos.to_grid_index()];
            if neighbor.is_flagged || neighbor.is_revealed {
                continue;
            }
            if neighbor.is_mine {
                return ChordOutcome::HitMine(pos);
            }
            changed |= self.reveal_cell(pos);
        }

        if changed {
            ChordOutcome::Revealed
        } else {
            ChordOutcome::NoChange
        }
    }

    /// Flags or unflags a covered cell. Returns whether anything changed.
    pub(crate) fn set_flagged(&mut self, coords: Coord2, flagged: bool) -> bool {
        let cell = &mut self.cells[coords.to_grid_index()];
        if cell.is_revealed || cell.is_flagged == flagged {
            return false;
        }

        cell.is_flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        true
    }

    /// Shows every mine after a loss. Flags stay where the player put
    /// them and `revealed_count` keeps counting safe cells only.
    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.is_revealed = true;
            }
        }
    }

    pub(crate) fn mark_losing_mine(&mut self, coords: Coord2) {
        self.cells[coords.to_grid_index()].is_losing_mine = true;
    }

    /// Completes the board after a flag-triggered win: any still-unflagged
    /// mine gets its flag and every remaining safe cell is revealed.
    pub(crate) fn finish_flag_win(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                if !cell.is_flagged {
                    cell.is_flagged = true;
                    self.flagged_count += 1;
                }
            } else if !cell.is_revealed {
                cell.is_revealed = true;
                self.revealed_count += 1;
            }
        }
    }
}
