/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Maps `(x, y)` to the `[row, column]` index of a row-major grid, so the
/// flat position of a cell is `y * board_size + x`.
pub trait ToGridIndex {
    type Output;
    fn to_grid_index(self) -> Self::Output;
}

impl ToGridIndex for Coord2 {
    type Output = [usize; 2];

    fn to_grid_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Number of cells on a square board of the given side length.
pub const fn cell_area(size: Coord) -> CellCount {
    let size = size as CellCount;
    size * size
}

/// Iterates the up-to-8 in-bounds neighbors of `center` on a square board,
/// row-major (top row first, left to right), skipping `center` itself.
pub fn neighbors(center: Coord2, size: Coord) -> impl Iterator<Item = Coord2> {
    let (cx, cy) = center;
    let x_lo = cx.saturating_sub(1);
    let y_lo = cy.saturating_sub(1);
    let x_hi = cx.saturating_add(1).min(size.saturating_sub(1));
    let y_hi = cy.saturating_add(1).min(size.saturating_sub(1));

    (y_lo..=y_hi)
        .flat_map(move |y| (x_lo..=x_hi).map(move |x| (x, y)))
        .filter(move |&pos| pos != center)
}
