//! Game session state.
//!
//! A session owns the random source, the current level's maze, the player and goal positions, the
//! view settings, and the statistics that drive achievements. Each level gets a freshly generated
//! grid; nothing carries over from the previous one apart from the settings and statistics.

use std::fmt;

use clap::ValueEnum;
use color_eyre::eyre::Result;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    achievements::{Achievement, Achievements, Stats},
    generator::{self, Algorithm, Maze},
    grid::{Direction, Grid, Position},
    navigation::{self, MoveOutcome, Phase},
    visibility::{INITIAL_VIEW_RADIUS, MAX_VIEW_RADIUS, MIN_VIEW_RADIUS},
};

/// Difficulty tier, deciding how large mazes start and how quickly they grow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Small mazes that grow slowly.
    Easy,
    /// Medium mazes.
    #[default]
    Normal,
    /// Large mazes that grow every level.
    Hard,
}

/// Size progression of a difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    /// Maze width on the first level.
    pub start_width: usize,
    /// Maze height on the first level.
    pub start_height: usize,
    /// Width the mazes stop growing at.
    pub max_width: usize,
    /// Height the mazes stop growing at.
    pub max_height: usize,
    /// Number of levels between each one-cell growth step.
    pub growth_rate: u32,
}

impl Difficulty {
    /// Every tier, from easiest to hardest.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Returns the size progression of the tier.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self {
            Self::Easy => Tier {
                start_width: 12,
                start_height: 12,
                max_width: 20,
                max_height: 20,
                growth_rate: 3,
            },
            Self::Normal => Tier {
                start_width: 20,
                start_height: 20,
                max_width: 32,
                max_height: 32,
                growth_rate: 2,
            },
            Self::Hard => Tier {
                start_width: 30,
                start_height: 30,
                max_width: 45,
                max_height: 45,
                growth_rate: 1,
            },
        }
    }

    /// Returns the maze width and height for a level, counting levels from 1.
    #[must_use]
    pub fn dimensions(self, level: u32) -> (usize, usize) {
        let tier = self.tier();
        let steps = level.saturating_sub(1) / tier.growth_rate.max(1);
        let steps = usize::try_from(steps).unwrap_or(usize::MAX);

        (
            tier.start_width.saturating_add(steps).min(tier.max_width),
            tier.start_height.saturating_add(steps).min(tier.max_height),
        )
    }

    /// Returns the display name of the tier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Settings a session starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Starting difficulty.
    pub difficulty: Difficulty,
    /// Starting view radius; clamped into the allowed range.
    pub view_radius: u32,
    /// Whether the fog of war starts enabled.
    pub fog: bool,
    /// Seed for the random source; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            view_radius: INITIAL_VIEW_RADIUS,
            fog: true,
            seed: None,
        }
    }
}

/// What a move accepted by the session did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Outcome reported by the navigation engine.
    pub outcome: MoveOutcome,
    /// Achievements unlocked by this move.
    pub unlocked: Vec<Achievement>,
}

/// State of a running game.
pub struct Session {
    /// Random source shared by every level of the session.
    rng: ChaCha8Rng,
    /// Current difficulty tier.
    difficulty: Difficulty,
    /// Current level, counted from 1.
    level: u32,
    /// Strategy that generated the current maze.
    algorithm: Algorithm,
    /// Maze of the current level.
    grid: Grid,
    /// Player position.
    player: Position,
    /// Goal position, the bottom-right cell.
    goal: Position,
    /// Whether the goal has been reached.
    phase: Phase,
    /// Successful moves on the current level.
    moves: u32,
    /// Current view radius.
    view_radius: u32,
    /// Whether the fog of war is enabled.
    fog: bool,
    /// Totals across every level of the session.
    stats: Stats,
    /// Achievements unlocked so far.
    achievements: Achievements,
}

impl Session {
    /// Starts a session on level 1 of the configured difficulty.
    ///
    /// # Errors
    ///
    /// This function returns an error if the first maze cannot be generated.
    pub fn new(settings: Settings) -> Result<Self> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (width, height) = settings.difficulty.dimensions(1);
        let Maze { algorithm, grid } = generator::generate(width, height, &mut rng)?;

        info!(
            seed,
            difficulty = %settings.difficulty,
            %algorithm,
            width,
            height,
            "started session"
        );

        Ok(Self {
            rng,
            difficulty: settings.difficulty,
            level: 1,
            algorithm,
            goal: Position::new(width - 1, height - 1),
            grid,
            player: Position::new(0, 0),
            phase: Phase::Playing,
            moves: 0,
            view_radius: settings
                .view_radius
                .clamp(MIN_VIEW_RADIUS, MAX_VIEW_RADIUS),
            fog: settings.fog,
            stats: Stats::default(),
            achievements: Achievements::default(),
        })
    }

    /// Replaces the maze with a fresh one for the given level and difficulty.
    ///
    /// The player goes back to the top-left cell and the level move counter restarts. Unless
    /// `keep_settings` is set, the view radius and fog return to their initial values.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub fn start_level(
        &mut self,
        level: u32,
        difficulty: Difficulty,
        keep_settings: bool,
    ) -> Result<()> {
        let level = level.max(1);
        let (width, height) = difficulty.dimensions(level);
        let Maze { algorithm, grid } = generator::generate(width, height, &mut self.rng)?;

        self.grid = grid;
        self.algorithm = algorithm;
        self.level = level;
        self.difficulty = difficulty;
        self.player = Position::new(0, 0);
        self.goal = Position::new(width - 1, height - 1);
        self.phase = Phase::Playing;
        self.moves = 0;
        if !keep_settings {
            self.view_radius = INITIAL_VIEW_RADIUS;
            self.fog = true;
        }

        info!(level, %difficulty, %algorithm, width, height, "started level");

        Ok(())
    }

    /// Advances to the next level on the same difficulty.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub fn next_level(&mut self) -> Result<()> {
        self.start_level(self.level.saturating_add(1), self.difficulty, true)
    }

    /// Regenerates the current level.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub fn reset_level(&mut self) -> Result<()> {
        self.start_level(self.level, self.difficulty, true)
    }

    /// Starts over from level 1 with default view settings.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub fn new_game(&mut self) -> Result<()> {
        self.start_level(1, self.difficulty, false)
    }

    /// Switches difficulty and restarts from level 1, keeping the view settings.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.start_level(1, difficulty, true)
    }

    /// Tries to move the player one cell.
    ///
    /// Returns [`None`] when the level is already finished, in which case nothing changes. Bumps
    /// into walls are reported but do not count as moves.
    ///
    /// # Errors
    ///
    /// This function returns an error if the player or goal lies outside the maze, which would
    /// mean the session state is corrupt.
    pub fn move_player(&mut self, direction: Direction) -> Result<Option<MoveReport>> {
        if self.phase.is_finished() {
            return Ok(None);
        }

        let outcome = navigation::attempt_move(&self.grid, self.player, self.goal, direction)?;
        if !outcome.moved {
            debug!(?direction, position = ?self.player, "bumped into a wall");
            return Ok(Some(MoveReport {
                outcome,
                unlocked: Vec::new(),
            }));
        }

        self.player = outcome.position;
        debug!(?direction, position = ?outcome.position, "moved");
        self.moves = self.moves.saturating_add(1);
        self.stats.total_moves = self.stats.total_moves.saturating_add(1);
        self.phase = self.phase.after(outcome);

        if outcome.finished {
            self.stats.levels_completed = self.stats.levels_completed.saturating_add(1);
            if self.difficulty == Difficulty::Hard {
                self.stats.hard_levels_completed =
                    self.stats.hard_levels_completed.saturating_add(1);
            }
            info!(level = self.level, moves = self.moves, "reached the goal");
        }

        let unlocked = self.achievements.check(&self.stats);
        for achievement in &unlocked {
            info!(id = achievement.id(), "unlocked achievement");
        }

        Ok(Some(MoveReport { outcome, unlocked }))
    }

    /// Sets the view radius, clamped into the allowed range, and returns the value applied.
    pub fn set_view_radius(&mut self, radius: u32) -> u32 {
        self.view_radius = radius.clamp(MIN_VIEW_RADIUS, MAX_VIEW_RADIUS);
        self.view_radius
    }

    /// Flips the fog of war and returns whether it is now enabled.
    pub fn toggle_fog(&mut self) -> bool {
        self.fog = !self.fog;
        self.fog
    }

    /// Returns the maze of the current level.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns the goal position.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Returns the current level, counted from 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the current difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the strategy that generated the current maze.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns whether the goal has been reached.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the number of successful moves on the current level.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Returns the view radius.
    #[must_use]
    pub const fn view_radius(&self) -> u32 {
        self.view_radius
    }

    /// Returns whether the fog of war is enabled.
    #[must_use]
    pub const fn fog(&self) -> bool {
        self.fog
    }

    /// Returns the statistics of the session.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the achievements unlocked so far.
    #[must_use]
    pub const fn achievements(&self) -> &Achievements {
        &self.achievements
    }
}
