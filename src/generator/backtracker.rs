//! Recursive backtracker, a randomized depth-first carving strategy.
//!
//! The walk keeps an explicit stack instead of recursing, so large grids cannot overflow the call
//! stack.

use color_eyre::eyre::Result;
use rand::{seq::SliceRandom as _, Rng};
use tracing::trace;

use super::Visited;
use crate::grid::{Grid, Position};

/// Carves a perfect maze by walking randomly and backtracking out of dead ends.
///
/// The walk starts at the top-left cell. At each step it looks at the cell on top of the stack and
/// moves into a random unvisited neighbor, opening the wall between them. When no such neighbor is
/// left it pops the stack. The walk ends once the stack is empty, at which point every cell has
/// been visited.
///
/// # Errors
///
/// This function returns an error if either dimension is zero.
pub fn generate<R>(width: usize, height: usize, rng: &mut R) -> Result<Grid>
where
    R: Rng + ?Sized,
{
    let mut grid = Grid::new(width, height, true)?;
    let mut visited = Visited::for_grid(&grid);
    let start = Position::new(0, 0);

    visited.mark(start);
    let mut stack = vec![start];
    let mut candidates = Vec::with_capacity(4);

    while let Some(&current) = stack.last() {
        candidates.clear();
        candidates.extend(
            grid.neighbors(current)
                .map(|(_, neighbor)| neighbor)
                .filter(|neighbor| !visited.contains(*neighbor)),
        );

        if let Some(&next) = candidates.choose(rng) {
            grid.carve_between(current, next)?;
            visited.mark(next);
            stack.push(next);
        } else {
            let _ = stack.pop();
        }
    }

    trace!(cells = visited.count(), "backtracker visited every cell");

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::grid::Direction;

    #[test]
    fn test_generate_single_cell_stays_closed() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grid = generate(1, 1, &mut rng).expect("failed to generate maze");

        assert_eq!(grid.open_passages(), 0);
        assert!(grid.boundary_is_closed());
    }

    #[test]
    fn test_generate_two_cells_are_connected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let grid = generate(2, 1, &mut rng).expect("failed to generate maze");

        assert!(grid.is_open(Position::new(0, 0), Direction::Right));
        assert!(grid.is_open(Position::new(1, 0), Direction::Left));
        assert!(grid.boundary_is_closed());
    }

    #[test]
    fn test_generate_spanning_tree() {
        for (width, height) in [(1, 7), (7, 1), (5, 5), (12, 9), (30, 20)] {
            for seed in 0..10 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let grid = generate(width, height, &mut rng).expect("failed to generate maze");

                assert!(
                    grid.is_perfect(),
                    "{width}x{height} with seed {seed} is not a spanning tree"
                );
                assert!(grid.walls_are_symmetric(), "{width}x{height} seed {seed}");
                assert!(grid.boundary_is_closed(), "{width}x{height} seed {seed}");
            }
        }
    }

    #[test]
    fn test_generate_rejects_zero_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(generate(0, 3, &mut rng).is_err(), "zero width must fail");
    }

    #[test]
    fn test_generate_depends_on_random_source() {
        let mazes: Vec<Grid> = (0..5)
            .map(|seed| {
                generate(10, 10, &mut ChaCha8Rng::seed_from_u64(seed))
                    .expect("failed to generate maze")
            })
            .collect();

        assert!(
            mazes.windows(2).any(|pair| matches!(pair, [first, second] if first != second)),
            "different seeds should give different mazes"
        );
    }
}
