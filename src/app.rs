//! Core application state and logic for the maze game.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    events,
    session::{Session, Settings},
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Game state of the running session.
    ///
    /// This field holds the maze of the current level together with the player, the view settings
    /// and the statistics. A session always holds a generated maze, so the in-game screen can be
    /// entered at any time.
    pub(crate) session: Session,
    /// Latest notification for the player.
    ///
    /// This field holds a short message, such as a freshly unlocked achievement, shown in the
    /// status bar until the next level starts or another message replaces it.
    pub(crate) toast: Option<String>,
}

impl App {
    /// Creates a new instance of the App structure from the starting settings.
    ///
    /// # Errors
    ///
    /// This function returns an error if the first maze cannot be generated.
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            session: Session::new(settings)?,
            toast: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        info!(
            levels = self.session.stats().levels_completed,
            moves = self.session.stats().total_moves,
            "leaving game"
        );

        Ok(())
    }
}
