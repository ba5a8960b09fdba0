//! Type definitions and enums for the application state and navigation.

use crate::session::Difficulty;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu, carrying the entry under the cursor.
    MainMenu(MainMenuItem),
    /// Options configuration screen.
    ///
    /// This variant represents the options menu, carrying the entry under the cursor.
    OptionsMenu(OptionsMenuItem),
    /// Difficulty selection screen.
    ///
    /// This variant carries the tier currently under the cursor, which need not be the tier the
    /// session is playing on.
    DifficultyMenu(Difficulty),
    /// In-game screen where the maze is explored.
    ///
    /// This variant represents the screen with the fogged maze, the status bar and, once the goal
    /// is reached, the completion banner.
    InGame,
    /// List of achievements.
    ///
    /// This variant represents the screen listing every achievement and whether it has been
    /// unlocked during the session.
    Achievements,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    ///
    /// This variant represents the entry that enters the maze of the running session.
    StartGame,
    /// "Options" menu option.
    ///
    /// This variant represents the entry that opens the options menu.
    Options,
    /// "Quit" menu option.
    ///
    /// This variant represents the entry that leaves the game.
    Quit,
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum OptionsMenuItem {
    /// "Difficulty" selection option.
    ///
    /// This variant represents the entry that opens the difficulty menu.
    Difficulty,
    /// "Back" navigation option.
    ///
    /// This variant represents the entry that returns to the main menu.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant carries the number of entries in the main menu.
    MainMenu(u8),
    /// Options menu configuration.
    ///
    /// This variant carries the number of entries in the options menu.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

/// Returns the tier after the given one, staying on the last tier.
pub(crate) fn next_difficulty(difficulty: Difficulty) -> Difficulty {
    Difficulty::ALL
        .iter()
        .skip_while(|tier| **tier != difficulty)
        .nth(1)
        .copied()
        .unwrap_or(difficulty)
}

/// Returns the tier before the given one, staying on the first tier.
pub(crate) fn previous_difficulty(difficulty: Difficulty) -> Difficulty {
    Difficulty::ALL
        .iter()
        .rev()
        .skip_while(|tier| **tier != difficulty)
        .nth(1)
        .copied()
        .unwrap_or(difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::StartGame);
        let options_menu = Screen::OptionsMenu(OptionsMenuItem::Back);
        let difficulty_menu = Screen::DifficultyMenu(Difficulty::Hard);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Back));
        assert_ne!(difficulty_menu, Screen::DifficultyMenu(Difficulty::Easy));
        assert_ne!(Screen::InGame, Screen::Achievements);
    }

    #[test]
    fn test_menu_type_repr() {
        let main_menu = MenuType::MainMenu(3);
        let options_menu = MenuType::OptionsMenu(2);

        assert_eq!(main_menu.repr(), "Main Menu");
        assert_eq!(options_menu.repr(), "Options Menu");
    }

    #[test]
    fn test_menu_type_value() {
        let main_menu = MenuType::MainMenu(3);
        let options_menu = MenuType::OptionsMenu(2);

        assert_eq!(main_menu.value(), 3);
        assert_eq!(options_menu.value(), 2);
    }

    #[test]
    fn test_difficulty_cursor() {
        assert_eq!(next_difficulty(Difficulty::Easy), Difficulty::Normal);
        assert_eq!(next_difficulty(Difficulty::Normal), Difficulty::Hard);
        assert_eq!(next_difficulty(Difficulty::Hard), Difficulty::Hard);
        assert_eq!(previous_difficulty(Difficulty::Hard), Difficulty::Normal);
        assert_eq!(previous_difficulty(Difficulty::Easy), Difficulty::Easy);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::StartGame), "StartGame");
        assert_eq!(format!("{:?}", OptionsMenuItem::Difficulty), "Difficulty");
    }
}
