//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    grid::Direction,
    types::{self, MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. It uses a timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press.
///
/// The in-game screen has its own set of keys; every other screen is driven by the menu keys.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    if matches!(app.screen, Screen::InGame) {
        return handle_in_game_key(app, code);
    }

    match code {
        KeyCode::Char('j') | KeyCode::Down => handle_j_events(app),
        KeyCode::Char('k') | KeyCode::Up => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app)?,
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Maps a key to the movement direction it stands for, if any.
pub(crate) const fn movement(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
        _ => None,
    }
}

/// Handles key presses on the in-game screen.
///
/// Arrow keys and `wasd` move the player, `+` and `-` change the view radius, `f` toggles the fog,
/// `r` regenerates the level, `n` moves on once the goal is reached, `g` starts a new game, `t`
/// opens the achievements and `h` returns to the main menu.
pub(crate) fn handle_in_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    if let Some(direction) = movement(code) {
        if let Some(report) = app.session.move_player(direction)? {
            if let Some(latest) = report.unlocked.last() {
                app.toast = Some(format!("Achievement unlocked: {latest}"));
            }
        }
        return Ok(());
    }

    match code {
        KeyCode::Char('+' | '=') => {
            let _ = app
                .session
                .set_view_radius(app.session.view_radius().saturating_add(1));
        }
        KeyCode::Char('-' | '_') => {
            let _ = app
                .session
                .set_view_radius(app.session.view_radius().saturating_sub(1));
        }
        KeyCode::Char('f') => {
            let _ = app.session.toggle_fog();
        }
        KeyCode::Char('r') => {
            app.session.reset_level()?;
            app.toast = None;
        }
        KeyCode::Char('n') if app.session.phase().is_finished() => {
            app.session.next_level()?;
            app.toast = None;
        }
        KeyCode::Char('g') => {
            app.session.new_game()?;
            app.toast = None;
        }
        KeyCode::Char('t') => app.screen = Screen::Achievements,
        KeyCode::Char('h') | KeyCode::Esc => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus and lists.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Difficulty) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        Screen::DifficultyMenu(cursor) => {
            app.screen = Screen::DifficultyMenu(types::next_difficulty(cursor));
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus and lists.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Difficulty);
        }
        Screen::DifficultyMenu(cursor) => {
            app.screen = Screen::DifficultyMenu(types::previous_difficulty(cursor));
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. Picking a different tier in the difficulty menu restarts the
/// game from level 1 on that tier.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Difficulty);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Difficulty) => {
            app.screen = Screen::DifficultyMenu(app.session.difficulty());
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::DifficultyMenu(cursor) if cursor != app.session.difficulty() => {
            app.session.change_difficulty(cursor)?;
            app.toast = None;
        }
        _ => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for moving back or returning to
/// previous screens.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::DifficultyMenu(_) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Difficulty);
        }
        Screen::Achievements => {
            app.screen = Screen::InGame;
        }
        _ => {}
    }
}
