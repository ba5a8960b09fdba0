//! Grid model module.
//!
//! This module contains the cell and grid data structures shared by every maze generator, along
//! with the wall-mutation primitives that keep the two sides of a shared wall in agreement.

use color_eyre::eyre::{bail, ensure, eyre, OptionExt as _, Result};

/// Cell coordinates inside a grid.
///
/// Positions carry no bounds of their own; whether a position is valid depends on the [`Grid`] it
/// is used with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column of the cell, growing to the right.
    pub x: usize,
    /// Row of the cell, growing downwards.
    pub y: usize,
}

impl Position {
    /// Builds a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in the given direction.
    ///
    /// Stepping above the first row or left of the first column yields [`None`]; stepping past the
    /// far edges is left to [`Grid::neighbor`], since only a grid knows where those are.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Returns the direction leading from this position to an adjacent one.
    ///
    /// Yields [`None`] unless the two positions are exactly one orthogonal step apart.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == Some(other))
    }
}

/// The four orthogonal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the previous row.
    Up,
    /// Towards the next column.
    Right,
    /// Towards the next row.
    Down,
    /// Towards the previous column.
    Left,
}

impl Direction {
    /// Every direction, in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Returns the column and row deltas of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Wall flags for the four sides of a cell, where `true` means the wall is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag stands for one side of the cell and they change independently."
)]
pub struct Walls {
    /// Wall shared with the cell above.
    pub top: bool,
    /// Wall shared with the cell to the right.
    pub right: bool,
    /// Wall shared with the cell below.
    pub bottom: bool,
    /// Wall shared with the cell to the left.
    pub left: bool,
}

impl Walls {
    /// Builds a set of walls that are all closed or all open.
    #[must_use]
    pub const fn uniform(closed: bool) -> Self {
        Self {
            top: closed,
            right: closed,
            bottom: closed,
            left: closed,
        }
    }

    /// Returns whether the wall on the given side is closed.
    #[must_use]
    pub const fn is_closed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Opens or closes the wall on the given side.
    fn set(&mut self, direction: Direction, closed: bool) {
        match direction {
            Direction::Up => self.top = closed,
            Direction::Right => self.right = closed,
            Direction::Down => self.bottom = closed,
            Direction::Left => self.left = closed,
        }
    }
}

/// A single cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Fixed location of the cell inside its grid.
    pub position: Position,
    /// Current wall state of the cell.
    pub walls: Walls,
}

/// Rectangular matrix of cells stored row by row.
///
/// Grids are built once per level by a generator. The wall-mutation primitives are only visible
/// inside the crate, so a finished grid cannot be altered by its consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid whose walls are all closed or all open.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero.
    pub fn new(width: usize, height: usize, closed: bool) -> Result<Self> {
        ensure!(
            width >= 1 && height >= 1,
            "grid dimensions must be at least 1x1, got {width}x{height}"
        );

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(|position| Cell {
                position,
                walls: Walls::uniform(closed),
            })
            .collect();

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns whether the grid holds no cells, which a constructed grid never does.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns whether the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Maps a position to its slot in the row-major cell storage.
    pub(crate) const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.width + position.x)
        } else {
            None
        }
    }

    /// Returns the cell at the given position, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(self.index(position)?)
    }

    /// Returns every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the in-bounds neighbor in the given direction.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|neighbor| self.contains(*neighbor))
    }

    /// Returns the in-bounds neighbors of a position along with the direction leading to each.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.neighbor(position, direction)
                .map(|neighbor| (direction, neighbor))
        })
    }

    /// Returns whether the wall on the given side of a cell is open.
    ///
    /// Positions outside the grid report every wall as closed.
    #[must_use]
    pub fn is_open(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_some_and(|cell| !cell.walls.is_closed(direction))
    }

    /// Opens the pair of walls between two adjacent cells.
    ///
    /// # Errors
    ///
    /// This function returns an error if the cells are not adjacent or either lies outside the
    /// grid.
    pub(crate) fn carve_between(&mut self, from: Position, to: Position) -> Result<()> {
        self.set_between(from, to, false)
    }

    /// Closes the pair of walls between two adjacent cells.
    ///
    /// # Errors
    ///
    /// This function returns an error if the cells are not adjacent or either lies outside the
    /// grid.
    pub(crate) fn seal_between(&mut self, from: Position, to: Position) -> Result<()> {
        self.set_between(from, to, true)
    }

    /// Sets both sides of the wall shared by two adjacent cells.
    fn set_between(&mut self, from: Position, to: Position, closed: bool) -> Result<()> {
        let Some(direction) = from.direction_to(to) else {
            bail!("cells {from:?} and {to:?} are not adjacent");
        };

        self.cell_mut(from)?.walls.set(direction, closed);
        self.cell_mut(to)?.walls.set(direction.opposite(), closed);

        Ok(())
    }

    /// Closes every wall on the outer edge of the grid.
    pub(crate) fn close_boundary(&mut self) {
        let (width, height) = (self.width, self.height);

        for cell in &mut self.cells {
            let Position { x, y } = cell.position;
            cell.walls.top |= y == 0;
            cell.walls.bottom |= y + 1 == height;
            cell.walls.left |= x == 0;
            cell.walls.right |= x + 1 == width;
        }
    }

    /// Returns a mutable reference to the cell at the given position.
    fn cell_mut(&mut self, position: Position) -> Result<&mut Cell> {
        let index = self
            .index(position)
            .ok_or_else(|| eyre!("position {position:?} lies outside the grid"))?;
        self.cells
            .get_mut(index)
            .ok_or_eyre("cell storage does not match the grid dimensions")
    }

    /// Counts the open walls between pairs of adjacent cells.
    ///
    /// Each shared wall is counted once, by looking only to the right and downwards. A perfect maze
    /// over `n` cells has exactly `n - 1` of them.
    #[must_use]
    pub fn open_passages(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|direction| {
                        self.neighbor(cell.position, *direction).is_some()
                            && !cell.walls.is_closed(*direction)
                    })
                    .count()
            })
            .sum()
    }

    /// Counts the cells reachable from a starting cell through open walls.
    #[must_use]
    pub fn reachable_from(&self, start: Position) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut stack = Vec::new();
        let mut count = 0;

        if let Some(slot) = self.index(start).and_then(|index| seen.get_mut(index)) {
            *slot = true;
            stack.push(start);
        }

        while let Some(position) = stack.pop() {
            count += 1;

            for (direction, neighbor) in self.neighbors(position) {
                if !self.is_open(position, direction) {
                    continue;
                }
                if let Some(slot) = self.index(neighbor).and_then(|index| seen.get_mut(index)) {
                    if !*slot {
                        *slot = true;
                        stack.push(neighbor);
                    }
                }
            }
        }

        count
    }

    /// Checks that every pair of adjacent cells agrees on the state of their shared wall.
    #[must_use]
    pub fn walls_are_symmetric(&self) -> bool {
        self.cells().all(|cell| {
            self.neighbors(cell.position).all(|(direction, neighbor)| {
                self.cell(neighbor).is_some_and(|other| {
                    other.walls.is_closed(direction.opposite())
                        == cell.walls.is_closed(direction)
                })
            })
        })
    }

    /// Checks that every wall on the outer edge of the grid is closed.
    #[must_use]
    pub fn boundary_is_closed(&self) -> bool {
        self.cells().all(|cell| {
            Direction::ALL.into_iter().all(|direction| {
                self.neighbor(cell.position, direction).is_some()
                    || cell.walls.is_closed(direction)
            })
        })
    }

    /// Checks that the open walls form a spanning tree over every cell.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.open_passages() + 1 == self.len()
            && self.reachable_from(Position::new(0, 0)) == self.len()
    }
}
