//! Recursive division.
//!
//! Unlike the carving strategies, this one starts from an open field enclosed by the outer
//! boundary and adds walls. Each region is split in two by a straight wall with a single gap, and
//! both halves are divided again until they are one cell thin.

use std::cmp::Ordering;

use color_eyre::eyre::Result;
use rand::Rng;

use crate::grid::{Grid, Position};

/// Rectangular part of the grid awaiting division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    /// Leftmost column.
    pub(crate) x: usize,
    /// Topmost row.
    pub(crate) y: usize,
    /// Number of columns.
    pub(crate) width: usize,
    /// Number of rows.
    pub(crate) height: usize,
}

impl Region {
    /// Returns whether the region is too thin to hold a dividing wall.
    const fn is_atomic(self) -> bool {
        self.width < 2 || self.height < 2
    }
}

/// Orientation of a dividing wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Split {
    /// A wall running left to right, separating rows.
    Horizontal,
    /// A wall running top to bottom, separating columns.
    Vertical,
}

impl Split {
    /// Picks the orientation that cuts across the longer side of a region.
    ///
    /// Square regions get either orientation with equal probability.
    fn for_region<R>(region: Region, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        match region.width.cmp(&region.height) {
            Ordering::Less => Self::Horizontal,
            Ordering::Greater => Self::Vertical,
            Ordering::Equal => {
                if rng.gen_bool(0.5) {
                    Self::Horizontal
                } else {
                    Self::Vertical
                }
            }
        }
    }
}

/// Builds a maze by recursively dividing an open field.
///
/// # Errors
///
/// This function returns an error if either dimension is zero.
pub fn generate<R>(width: usize, height: usize, rng: &mut R) -> Result<Grid>
where
    R: Rng + ?Sized,
{
    let mut grid = Grid::new(width, height, false)?;
    grid.close_boundary();

    divide(
        &mut grid,
        Region {
            x: 0,
            y: 0,
            width,
            height,
        },
        rng,
    )?;

    Ok(grid)
}

/// Splits a region with a gapped wall and divides both halves.
///
/// Regions narrower or shorter than two cells are left untouched. Every call either returns
/// immediately or recurses on two regions that are strictly smaller along the split axis, so the
/// recursion depth is bounded by the grid dimensions.
pub(crate) fn divide<R>(grid: &mut Grid, region: Region, rng: &mut R) -> Result<()>
where
    R: Rng + ?Sized,
{
    if region.is_atomic() {
        return Ok(());
    }

    let Region {
        x,
        y,
        width,
        height,
    } = region;

    match Split::for_region(region, rng) {
        Split::Horizontal => {
            let wall_row = rng.gen_range(y..y + height - 1);
            let gap_column = rng.gen_range(x..x + width);

            for column in (x..x + width).filter(|column| *column != gap_column) {
                grid.seal_between(
                    Position::new(column, wall_row),
                    Position::new(column, wall_row + 1),
                )?;
            }

            let upper = wall_row - y + 1;
            divide(grid, Region { height: upper, ..region }, rng)?;
            divide(
                grid,
                Region {
                    y: wall_row + 1,
                    height: height - upper,
                    ..region
                },
                rng,
            )
        }
        Split::Vertical => {
            let wall_column = rng.gen_range(x..x + width - 1);
            let gap_row = rng.gen_range(y..y + height);

            for row in (y..y + height).filter(|row| *row != gap_row) {
                grid.seal_between(
                    Position::new(wall_column, row),
                    Position::new(wall_column + 1, row),
                )?;
            }

            let left = wall_column - x + 1;
            divide(grid, Region { width: left, ..region }, rng)?;
            divide(
                grid,
                Region {
                    x: wall_column + 1,
                    width: width - left,
                    ..region
                },
                rng,
            )
        }
    }
}
