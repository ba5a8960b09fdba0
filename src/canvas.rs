//! Block layout of a maze and its projection onto canvas coordinates.
//!
//! A `width` by `height` grid is drawn as a `(2 * width + 1)` by `(2 * height + 1)` matrix of
//! blocks. Cell `(x, y)` sits at block `(2x + 1, 2y + 1)`, the blocks between cell centres stand
//! for the walls between them, and the blocks at even coordinates on both axes are wall corners.

use std::collections::BTreeSet;

use color_eyre::eyre::Result;

use crate::grid::{Direction, Grid, Position};

/// Size of the block layout of a grid as `(columns, rows)`.
pub(crate) const fn layout_size(grid: &Grid) -> (usize, usize) {
    (2 * grid.width() + 1, 2 * grid.height() + 1)
}

/// Returns the block at the centre of a cell.
pub(crate) const fn cell_block(position: Position) -> (usize, usize) {
    (2 * position.x + 1, 2 * position.y + 1)
}

/// Collects the wall blocks around the visible cells of a grid.
///
/// Only cells in `visible` contribute, so walls deep inside the fog are never drawn. A wall shared
/// by a visible and a hidden cell is still drawn, since the visible side can see it.
pub(crate) fn wall_blocks(grid: &Grid, visible: &BTreeSet<Position>) -> BTreeSet<(usize, usize)> {
    let mut blocks = BTreeSet::new();

    for cell in grid.cells().filter(|cell| visible.contains(&cell.position)) {
        let (col, row) = cell_block(cell.position);

        for (dx, dy) in [(-1, -1), (1, -1), (1, 1), (-1, 1)] {
            if let (Some(corner_col), Some(corner_row)) =
                (col.checked_add_signed(dx), row.checked_add_signed(dy))
            {
                let _ = blocks.insert((corner_col, corner_row));
            }
        }

        for direction in Direction::ALL {
            if !cell.walls.is_closed(direction) {
                continue;
            }
            let (dx, dy) = direction.offset();
            if let (Some(wall_col), Some(wall_row)) =
                (col.checked_add_signed(dx), row.checked_add_signed(dy))
            {
                let _ = blocks.insert((wall_col, wall_row));
            }
        }
    }

    blocks
}

/// Transforms block coordinates to canvas coordinates centred on the layout.
///
/// Columns map to `x = col - (columns - 1) / 2`, growing rightwards, and rows map to
/// `y = (rows - 1) / 2 - row`, growing upwards as the canvas expects.
///
/// # Errors
///
/// This function returns an error if a coordinate does not fit in a `u16`.
pub(crate) fn to_screen_coords<'blocks, I>(
    blocks: I,
    (columns, rows): (usize, usize),
) -> Result<Vec<(f64, f64)>>
where
    I: IntoIterator<Item = &'blocks (usize, usize)>,
{
    let columns_n = f64::from(u16::try_from(columns)?);
    let rows_n = f64::from(u16::try_from(rows)?);

    blocks
        .into_iter()
        .map(|&(col, row)| {
            let screen_x = f64::from(u16::try_from(col)?) - (columns_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}
