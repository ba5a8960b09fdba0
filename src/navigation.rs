//! Movement of the player through a finished maze.
//!
//! Moving is a pure lookup against the wall state of the grid. Counting moves, tracking statistics
//! and reacting to the goal are left to the caller.

use color_eyre::eyre::{ensure, OptionExt as _, Result};

use crate::grid::{Direction, Grid, Position};

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Player position after the attempt; unchanged after a bump.
    pub position: Position,
    /// Whether the player actually moved.
    pub moved: bool,
    /// Whether the move landed on the goal.
    pub finished: bool,
}

/// Progress of the player through the current level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// The goal has not been reached yet and moves are accepted.
    #[default]
    Playing,
    /// The goal has been reached. Only starting a new level leaves this phase.
    Finished,
}

impl Phase {
    /// Returns the phase that follows a move outcome.
    #[must_use]
    pub const fn after(self, outcome: MoveOutcome) -> Self {
        match self {
            Self::Finished => Self::Finished,
            Self::Playing if outcome.finished => Self::Finished,
            Self::Playing => Self::Playing,
        }
    }

    /// Returns whether the level is over.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

/// Tries to move the player one cell in the given direction.
///
/// A closed wall is a bump: the position is returned unchanged with `moved` and `finished` both
/// unset. An open wall moves the player to the adjacent cell, and `finished` reports whether that
/// cell is the goal.
///
/// # Errors
///
/// This function returns an error if the player or the goal lies outside the grid, or if an open
/// wall leads off the grid.
pub fn attempt_move(
    grid: &Grid,
    player: Position,
    goal: Position,
    direction: Direction,
) -> Result<MoveOutcome> {
    ensure!(
        grid.contains(player),
        "player position {player:?} lies outside the {}x{} grid",
        grid.width(),
        grid.height()
    );
    ensure!(
        grid.contains(goal),
        "goal position {goal:?} lies outside the {}x{} grid",
        grid.width(),
        grid.height()
    );

    if !grid.is_open(player, direction) {
        return Ok(MoveOutcome {
            position: player,
            moved: false,
            finished: false,
        });
    }

    let position = grid
        .neighbor(player, direction)
        .ok_or_eyre("an open wall leads off the grid")?;

    Ok(MoveOutcome {
        position,
        moved: true,
        finished: position == goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a 3x1 corridor with the wall between the first two cells open.
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 1, true).expect("failed to create grid");
        grid.carve_between(Position::new(0, 0), Position::new(1, 0))
            .expect("failed to carve");
        grid
    }

    #[test]
    fn test_attempt_move_into_closed_wall() {
        let grid = corridor();
        let player = Position::new(0, 0);
        let outcome = attempt_move(&grid, player, Position::new(2, 0), Direction::Up)
            .expect("move should be evaluated");

        assert_eq!(
            outcome,
            MoveOutcome {
                position: player,
                moved: false,
                finished: false,
            }
        );
    }

    #[test]
    fn test_attempt_move_through_open_wall() {
        let grid = corridor();
        let outcome = attempt_move(
            &grid,
            Position::new(0, 0),
            Position::new(2, 0),
            Direction::Right,
        )
        .expect("move should be evaluated");

        assert_eq!(outcome.position, Position::new(1, 0));
        assert!(outcome.moved);
        assert!(!outcome.finished);
    }

    #[test]
    fn test_attempt_move_reaches_goal() {
        let grid = corridor();
        let outcome = attempt_move(
            &grid,
            Position::new(1, 0),
            Position::new(0, 0),
            Direction::Left,
        )
        .expect("move should be evaluated");

        assert_eq!(outcome.position, Position::new(0, 0));
        assert!(outcome.moved);
        assert!(outcome.finished, "landing on the goal finishes the level");
    }

    #[test]
    fn test_attempt_move_bump_next_to_goal_does_not_finish() {
        let grid = corridor();
        let outcome = attempt_move(
            &grid,
            Position::new(1, 0),
            Position::new(2, 0),
            Direction::Right,
        )
        .expect("move should be evaluated");

        assert!(!outcome.moved);
        assert!(!outcome.finished, "a bump never finishes the level");
    }

    #[test]
    fn test_attempt_move_rejects_positions_outside_grid() {
        let grid = corridor();

        assert!(attempt_move(
            &grid,
            Position::new(3, 0),
            Position::new(2, 0),
            Direction::Left
        )
        .is_err());
        assert!(attempt_move(
            &grid,
            Position::new(0, 0),
            Position::new(0, 4),
            Direction::Right
        )
        .is_err());
    }

    #[test]
    fn test_attempt_move_rejects_corrupt_boundary() {
        let grid = Grid::new(1, 1, false).expect("failed to create grid");

        assert!(
            attempt_move(&grid, Position::new(0, 0), Position::new(0, 0), Direction::Up).is_err(),
            "an open outer wall must not move the player off the grid"
        );
    }

    #[test]
    fn test_attempt_move_every_direction_moves_one_cell() {
        let grid = Grid::new(3, 3, false).expect("failed to create grid");
        let center = Position::new(1, 1);

        for direction in Direction::ALL {
            let outcome = attempt_move(&grid, center, Position::new(0, 0), direction)
                .expect("move should be evaluated");
            let (dx, dy) = direction.offset();

            assert!(outcome.moved);
            assert_eq!(outcome.position.x.checked_add_signed(-dx), Some(center.x));
            assert_eq!(outcome.position.y.checked_add_signed(-dy), Some(center.y));
        }
    }

    #[test]
    fn test_phase_transitions() {
        let bump = MoveOutcome {
            position: Position::new(0, 0),
            moved: false,
            finished: false,
        };
        let win = MoveOutcome {
            position: Position::new(1, 0),
            moved: true,
            finished: true,
        };

        assert_eq!(Phase::default(), Phase::Playing);
        assert_eq!(Phase::Playing.after(bump), Phase::Playing);
        assert_eq!(Phase::Playing.after(win), Phase::Finished);
        assert_eq!(Phase::Finished.after(bump), Phase::Finished);
        assert!(Phase::Finished.is_finished());
        assert!(!Phase::Playing.is_finished());
    }
}
