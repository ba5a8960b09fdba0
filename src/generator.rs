//! Maze generation module.
//!
//! This module holds the three generation strategies behind a single closed [`Algorithm`] type and
//! the dispatcher that picks one of them for each new level. Every strategy takes the dimensions of
//! the maze and a random source, and returns a fully formed, connected [`Grid`].

pub mod backtracker;
pub mod division;
pub mod prim;

use std::fmt;

use color_eyre::eyre::{ensure, OptionExt as _, Result};
use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::grid::{Grid, Position};

/// The available maze generation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Randomized depth-first carving. Produces long winding corridors with few branches.
    RecursiveBacktracker,
    /// Randomized Prim's algorithm. Produces short dead ends and a bushier branching structure.
    RandomizedPrim,
    /// Recursive division. Produces room-like partitions with long straight walls.
    RecursiveDivision,
}

impl Algorithm {
    /// Every strategy, each picked with equal probability by [`Algorithm::choose`].
    pub const ALL: [Self; 3] = [
        Self::RecursiveBacktracker,
        Self::RandomizedPrim,
        Self::RecursiveDivision,
    ];

    /// Picks one strategy uniformly at random.
    ///
    /// # Errors
    ///
    /// This function cannot fail in practice; the error path only exists because choosing from a
    /// slice is fallible in general.
    pub fn choose<R>(rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::ALL
            .choose(rng)
            .copied()
            .ok_or_eyre("no maze generation strategy available")
    }

    /// Builds a maze of the given dimensions with this strategy.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero.
    pub fn build<R>(self, width: usize, height: usize, rng: &mut R) -> Result<Grid>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::RecursiveBacktracker => backtracker::generate(width, height, rng),
            Self::RandomizedPrim => prim::generate(width, height, rng),
            Self::RecursiveDivision => division::generate(width, height, rng),
        }
    }

    /// Returns the human readable name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RecursiveBacktracker => "Recursive Backtracker",
            Self::RandomizedPrim => "Randomized Prim's",
            Self::RecursiveDivision => "Recursive Division",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A generated maze together with the strategy that carved it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Strategy picked by the dispatcher.
    pub algorithm: Algorithm,
    /// The carved grid.
    pub grid: Grid,
}

/// Generates a maze with a strategy picked uniformly at random.
///
/// # Errors
///
/// This function returns an error if either dimension is zero. The check happens before a strategy
/// is picked, so a rejected request never consumes randomness.
pub fn generate<R>(width: usize, height: usize, rng: &mut R) -> Result<Maze>
where
    R: Rng + ?Sized,
{
    ensure!(
        width >= 1 && height >= 1,
        "maze dimensions must be at least 1x1, got {width}x{height}"
    );

    let algorithm = Algorithm::choose(rng)?;
    debug!(%algorithm, width, height, "generating maze");

    let grid = algorithm.build(width, height, rng)?;

    Ok(Maze { algorithm, grid })
}

/// Visited marks for the cells of a grid, kept only while a maze is being carved.
///
/// The marks live beside the grid instead of inside its cells, so nothing of the generation
/// bookkeeping survives into the finished maze.
pub(crate) struct Visited {
    /// Number of columns in the grid being carved.
    width: usize,
    /// Marks in row-major order.
    marks: Vec<bool>,
}

impl Visited {
    /// Creates an empty set of marks sized for the given grid.
    pub(crate) fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            marks: vec![false; grid.len()],
        }
    }

    /// Marks a cell as part of the maze.
    pub(crate) fn mark(&mut self, position: Position) {
        if let Some(slot) = self.slot(position).and_then(|index| self.marks.get_mut(index)) {
            *slot = true;
        }
    }

    /// Returns whether a cell is already part of the maze.
    pub(crate) fn contains(&self, position: Position) -> bool {
        self.slot(position)
            .and_then(|index| self.marks.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the number of marked cells.
    pub(crate) fn count(&self) -> usize {
        self.marks.iter().filter(|mark| **mark).count()
    }

    /// Maps a position to its slot, rejecting columns beyond the grid width.
    const fn slot(&self, position: Position) -> Option<usize> {
        if position.x < self.width {
            Some(position.y * self.width + position.x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_generate_rejects_zero_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(generate(0, 5, &mut rng).is_err(), "zero width must fail");
        assert!(generate(5, 0, &mut rng).is_err(), "zero height must fail");
    }

    #[test]
    fn test_generate_rejection_consumes_no_randomness() {
        let mut used = ChaCha8Rng::seed_from_u64(9);
        let mut fresh = ChaCha8Rng::seed_from_u64(9);

        assert!(generate(0, 0, &mut used).is_err(), "empty maze must fail");
        assert_eq!(used.gen::<u64>(), fresh.gen::<u64>());
    }

    #[test]
    fn test_generate_single_cell() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let Maze { grid, .. } = generate(1, 1, &mut rng).expect("failed to generate maze");

            assert_eq!(grid.len(), 1);
            assert!(grid.boundary_is_closed(), "a lone cell is closed on every side");
        }
    }

    #[test]
    fn test_generate_is_connected_and_symmetric() {
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let Maze { grid, .. } = generate(9, 6, &mut rng).expect("failed to generate maze");

            assert_eq!(grid.reachable_from(Position::new(4, 3)), 54, "seed {seed}");
            assert!(grid.walls_are_symmetric(), "seed {seed}");
            assert!(grid.boundary_is_closed(), "seed {seed}");
        }
    }

    #[test]
    fn test_generate_is_deterministic_for_a_seed() {
        let first = generate(12, 8, &mut ChaCha8Rng::seed_from_u64(77)).expect("failed");
        let second = generate(12, 8, &mut ChaCha8Rng::seed_from_u64(77)).expect("failed");

        assert_eq!(first, second, "same seed must give the same maze");
    }

    #[test]
    fn test_generate_reports_the_strategy_it_used() {
        for seed in 0..30 {
            let mut picker = ChaCha8Rng::seed_from_u64(seed);
            let expected = Algorithm::choose(&mut picker).expect("failed to choose");
            let carved = expected
                .build(7, 5, &mut picker)
                .expect("failed to build maze");

            let maze = generate(7, 5, &mut ChaCha8Rng::seed_from_u64(seed))
                .expect("failed to generate maze");

            assert_eq!(maze.algorithm, expected, "seed {seed}");
            assert_eq!(maze.grid, carved, "seed {seed}");
        }
    }

    #[test]
    fn test_choose_picks_every_algorithm() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counts: HashMap<Algorithm, usize> = HashMap::new();

        for _ in 0..3000 {
            let algorithm = Algorithm::choose(&mut rng).expect("failed to choose");
            *counts.entry(algorithm).or_default() += 1;
        }

        for algorithm in Algorithm::ALL {
            let count = counts.get(&algorithm).copied().unwrap_or_default();
            assert!(
                (800..=1200).contains(&count),
                "{algorithm} picked {count} times out of 3000"
            );
        }
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(
            Algorithm::RecursiveBacktracker.to_string(),
            "Recursive Backtracker"
        );
        assert_eq!(Algorithm::RandomizedPrim.to_string(), "Randomized Prim's");
        assert_eq!(
            Algorithm::RecursiveDivision.to_string(),
            "Recursive Division"
        );
    }

    #[test]
    fn test_visited_marks() {
        let grid = Grid::new(3, 2, true).expect("failed to create grid");
        let mut visited = Visited::for_grid(&grid);

        assert_eq!(visited.count(), 0);
        visited.mark(Position::new(2, 1));
        visited.mark(Position::new(2, 1));
        visited.mark(Position::new(7, 0));

        assert!(visited.contains(Position::new(2, 1)));
        assert!(!visited.contains(Position::new(0, 1)));
        assert!(!visited.contains(Position::new(7, 0)), "out of range is never marked");
        assert_eq!(visited.count(), 1);
    }
}
