//! Achievement catalogue and unlock tracking.
//!
//! Achievements are derived from the running statistics of a session and only ever unlock; they
//! are kept in memory for the lifetime of the process.

use std::fmt;

/// Running totals across every level played in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Successful moves over all levels.
    pub total_moves: u64,
    /// Levels whose goal was reached.
    pub levels_completed: u32,
    /// Levels whose goal was reached on the hard difficulty.
    pub hard_levels_completed: u32,
}

/// A milestone the player can unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Achievement {
    /// Complete a first level.
    FirstStep,
    /// Move 500 times in total.
    Marathon,
    /// Complete ten levels.
    Veteran,
    /// Complete a level on hard.
    BraveHeart,
    /// Move 2000 times in total.
    Endurance,
}

impl Achievement {
    /// Every achievement, in display order.
    pub const ALL: [Self; 5] = [
        Self::FirstStep,
        Self::Marathon,
        Self::Veteran,
        Self::BraveHeart,
        Self::Endurance,
    ];

    /// Returns the stable identifier of the achievement.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstStep => "first_step",
            Self::Marathon => "marathon",
            Self::Veteran => "veteran",
            Self::BraveHeart => "brave_heart",
            Self::Endurance => "endurance",
        }
    }

    /// Returns the display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstStep => "First Steps",
            Self::Marathon => "Wayfarer",
            Self::Veteran => "Maze Veteran",
            Self::BraveHeart => "Brave Heart",
            Self::Endurance => "Endurance",
        }
    }

    /// Returns the unlock condition in words.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstStep => "Complete your first level",
            Self::Marathon => "Make 500 moves in total",
            Self::Veteran => "Complete 10 levels",
            Self::BraveHeart => "Complete a level on hard",
            Self::Endurance => "Make 2000 moves in total",
        }
    }

    /// Returns whether the statistics meet the unlock condition.
    #[must_use]
    pub const fn is_earned(self, stats: &Stats) -> bool {
        match self {
            Self::FirstStep => stats.levels_completed >= 1,
            Self::Marathon => stats.total_moves >= 500,
            Self::Veteran => stats.levels_completed >= 10,
            Self::BraveHeart => stats.hard_levels_completed >= 1,
            Self::Endurance => stats.total_moves >= 2000,
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.title())
    }
}

/// Set of achievements unlocked so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Achievements {
    /// Unlocked achievements in the order they were earned.
    unlocked: Vec<Achievement>,
}

impl Achievements {
    /// Unlocks every achievement whose condition is now met.
    ///
    /// Returns only the achievements unlocked by this call, in catalogue order.
    pub fn check(&mut self, stats: &Stats) -> Vec<Achievement> {
        let fresh: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|achievement| !self.is_unlocked(*achievement) && achievement.is_earned(stats))
            .collect();
        self.unlocked.extend(fresh.iter().copied());

        fresh
    }

    /// Returns whether an achievement has been unlocked.
    #[must_use]
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    /// Returns the number of unlocked achievements.
    #[must_use]
    pub fn count(&self) -> usize {
        self.unlocked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_earned_at_start() {
        let mut achievements = Achievements::default();

        assert!(achievements.check(&Stats::default()).is_empty());
        assert_eq!(achievements.count(), 0);
    }

    #[test]
    fn test_first_level_unlocks_first_step() {
        let mut achievements = Achievements::default();
        let stats = Stats {
            total_moves: 40,
            levels_completed: 1,
            hard_levels_completed: 0,
        };

        assert_eq!(achievements.check(&stats), vec![Achievement::FirstStep]);
        assert!(achievements.is_unlocked(Achievement::FirstStep));
        assert!(
            achievements.check(&stats).is_empty(),
            "an achievement unlocks only once"
        );
    }

    #[test]
    fn test_move_thresholds() {
        let mut achievements = Achievements::default();
        let mut stats = Stats {
            total_moves: 499,
            ..Stats::default()
        };
        assert!(achievements.check(&stats).is_empty());

        stats.total_moves = 500;
        assert_eq!(achievements.check(&stats), vec![Achievement::Marathon]);

        stats.total_moves = 2000;
        assert_eq!(achievements.check(&stats), vec![Achievement::Endurance]);
    }

    #[test]
    fn test_several_unlock_at_once_in_catalogue_order() {
        let mut achievements = Achievements::default();
        let stats = Stats {
            total_moves: 2500,
            levels_completed: 12,
            hard_levels_completed: 3,
        };

        assert_eq!(achievements.check(&stats), Achievement::ALL.to_vec());
        assert_eq!(achievements.count(), 5);
    }

    #[test]
    fn test_unlocks_never_revert() {
        let mut achievements = Achievements::default();
        let _ = achievements.check(&Stats {
            total_moves: 0,
            levels_completed: 0,
            hard_levels_completed: 1,
        });

        let _ = achievements.check(&Stats::default());
        assert!(achievements.is_unlocked(Achievement::BraveHeart));
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<&str> = Achievement::ALL.iter().map(|achievement| achievement.id()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), Achievement::ALL.len());
        assert_eq!(Achievement::Veteran.to_string(), "Maze Veteran");
    }
}
