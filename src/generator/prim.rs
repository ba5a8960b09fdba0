//! Randomized Prim's algorithm.
//!
//! The maze grows outwards from the top-left cell. The frontier holds unvisited cells next to the
//! maze and may list the same cell several times; stale entries are dropped when they are drawn.
//! Deduplicating the frontier would change which cells get drawn and so the shape of the mazes.

use color_eyre::eyre::Result;
use rand::{seq::SliceRandom as _, Rng};

use super::Visited;
use crate::grid::{Grid, Position};

/// Carves a perfect maze with randomized Prim's algorithm.
///
/// # Errors
///
/// This function returns an error if either dimension is zero.
pub fn generate<R>(width: usize, height: usize, rng: &mut R) -> Result<Grid>
where
    R: Rng + ?Sized,
{
    let mut carver = Carver::new(width, height)?;
    while carver.connect_next(rng)?.is_some() {}

    Ok(carver.finish())
}

/// In-progress state of a Prim's carving run.
pub(crate) struct Carver {
    /// Grid being carved.
    grid: Grid,
    /// Cells already connected to the maze.
    visited: Visited,
    /// Unvisited cells next to the maze, duplicates included.
    frontier: Vec<Position>,
}

impl Carver {
    /// Starts a run on a fully closed grid with only the top-left cell in the maze.
    pub(crate) fn new(width: usize, height: usize) -> Result<Self> {
        let grid = Grid::new(width, height, true)?;
        let visited = Visited::for_grid(&grid);
        let mut carver = Self {
            grid,
            visited,
            frontier: Vec::new(),
        };

        let start = Position::new(0, 0);
        carver.visited.mark(start);
        carver.extend_frontier(start);

        Ok(carver)
    }

    /// Draws frontier cells until one can be connected, and connects it.
    ///
    /// Returns the newly connected cell, or [`None`] once the frontier is exhausted.
    pub(crate) fn connect_next<R>(&mut self, rng: &mut R) -> Result<Option<Position>>
    where
        R: Rng + ?Sized,
    {
        while !self.frontier.is_empty() {
            let drawn = rng.gen_range(0..self.frontier.len());
            let current = self.frontier.swap_remove(drawn);

            if self.visited.contains(current) {
                continue;
            }

            let in_maze: Vec<Position> = self
                .grid
                .neighbors(current)
                .map(|(_, neighbor)| neighbor)
                .filter(|neighbor| self.visited.contains(*neighbor))
                .collect();

            // Frontier cells always enter through a visited neighbor.
            let Some(&anchor) = in_maze.choose(rng) else {
                continue;
            };

            self.grid.carve_between(current, anchor)?;
            self.visited.mark(current);
            self.extend_frontier(current);

            return Ok(Some(current));
        }

        Ok(None)
    }

    /// Appends the unvisited neighbors of a cell to the frontier.
    fn extend_frontier(&mut self, position: Position) {
        let fresh = self
            .grid
            .neighbors(position)
            .map(|(_, neighbor)| neighbor)
            .filter(|neighbor| !self.visited.contains(*neighbor));
        self.frontier.extend(fresh);
    }

    /// Returns the frontier, duplicates included.
    #[cfg(test)]
    pub(crate) fn frontier(&self) -> &[Position] {
        &self.frontier
    }

    /// Ends the run and hands over the carved grid.
    pub(crate) fn finish(self) -> Grid {
        self.grid
    }
}
