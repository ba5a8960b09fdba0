//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    achievements::Achievement,
    canvas,
    session::Difficulty,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    visibility, App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item),
        Screen::DifficultyMenu(cursor) => difficulty_menu(app, frame, *cursor)?,
        Screen::InGame => in_game(app, frame)?,
        Screen::Achievements => achievements(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Carves a centred rectangle out of an area, by percentage of its width and height.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
fn centered(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    let side = 100_u16.saturating_sub(horizontal) / 2;
    let space = Layout::horizontal([
        Constraint::Percentage(side),
        Constraint::Percentage(horizontal),
        Constraint::Percentage(side),
    ])
    .split(area)[1];
    let side = 100_u16.saturating_sub(vertical) / 2;

    Layout::vertical([
        Constraint::Percentage(side),
        Constraint::Percentage(vertical),
        Constraint::Percentage(side),
    ])
    .split(space)[1]
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = centered(frame.area(), 20, 20);

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value() as usize]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the selected one.
fn menu_entries(frame: &mut Frame, layout: &[Rect], entries: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (area, (label, active)) in layout.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(*label).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    menu_entries(
        frame,
        &inner_layout,
        &[
            ("Start Game", item == MainMenuItem::StartGame),
            ("Options", item == MainMenuItem::Options),
            ("Quit", item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with choices for "Difficulty" selection and "Return"
/// to the main menu. It provides the same navigation highlighting as the main menu.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));

    menu_entries(
        frame,
        &inner_layout,
        &[
            ("Difficulty", item == OptionsMenuItem::Difficulty),
            ("Return", item == OptionsMenuItem::Back),
        ],
    );
}

/// Renders the difficulty selection menu.
///
/// A dot marks the tier the session is playing on, while the highlighted row follows the cursor.
///
/// # Errors
///
/// This function may return errors if the menu layout cannot be split as expected.
pub(crate) fn difficulty_menu(app: &App, frame: &mut Frame, cursor: Difficulty) -> Result<()> {
    clear(frame);

    let space = centered(frame.area(), 40, 30);
    let block = Block::bordered()
        .title_top("Difficulty")
        .title_bottom("(j) down / (k) up / (l) select / (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);
    frame.render_widget(block, space);

    let rows = Layout::vertical(vec![Constraint::Max(1); Difficulty::ALL.len()]).split(inner_space);
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (row, tier) in rows.iter().zip(Difficulty::ALL) {
        let style = if tier == cursor {
            active_content_style
        } else {
            content_style
        };
        let columns = Layout::horizontal([Constraint::Length(3), Constraint::Fill(1)]).split(*row);
        let marker = if tier == app.session.difficulty() {
            DOT
        } else {
            " "
        };
        let (width, height) = tier.dimensions(1);

        frame.render_widget(
            Line::styled(marker, style).centered(),
            *columns.first().ok_or_eyre("failed to get marker column")?,
        );
        frame.render_widget(
            Line::styled(format!("{tier} ({width}x{height})"), style),
            *columns.last().ok_or_eyre("failed to get label column")?,
        );
    }

    Ok(())
}

/// Renders the in-game screen with the fogged maze, the status bar and the completion banner.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout splitting.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze area
        Constraint::Length(3), // Status block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    maze(app, frame, maze_content_area)?;
    status(app, frame, status_area);

    if app.session.phase().is_finished() {
        finished_banner(app, frame);
    }

    Ok(())
}

/// Draws the visible part of the maze, the goal and the player, centred in the given area.
///
/// The maze is drawn with braille dots, each terminal cell holding two columns and four rows of
/// the block layout.
fn maze(app: &App, frame: &mut Frame, area: Rect) -> Result<()> {
    let session = &app.session;
    let grid = session.grid();
    let (columns, rows) = canvas::layout_size(grid);

    let visible = visibility::visible_set(
        session.player(),
        session.view_radius(),
        session.fog(),
        grid.width(),
        grid.height(),
    );
    let walls = canvas::wall_blocks(grid, &visible);
    let wall_coords = canvas::to_screen_coords(&walls, (columns, rows))?;

    let player_block = canvas::cell_block(session.player());
    let goal_block = canvas::cell_block(session.goal());
    let markers = canvas::to_screen_coords(&[player_block, goal_block], (columns, rows))?;
    let (player_x, player_y) = *markers.first().ok_or_eyre("failed to place player")?;
    let (goal_x, goal_y) = *markers.last().ok_or_eyre("failed to place goal")?;
    let goal_visible = visible.contains(&session.goal());

    let canvas_width = u16::try_from(rounded_div::i32(i32::try_from(columns)?, 2))? + 1;
    let canvas_height = u16::try_from(rounded_div::i32(i32::try_from(rows)?, 4))? + 1;

    let space = Layout::vertical([Constraint::Length(canvas_height)])
        .flex(Flex::Center)
        .split(area)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze row from layout")?;
    let space = Layout::horizontal([Constraint::Length(canvas_width)])
        .flex(Flex::Center)
        .split(space)
        .first()
        .copied()
        .ok_or_eyre("failed to get maze space from layout")?;

    let half_columns = f64::from(u16::try_from(columns)?) / 2.;
    let half_rows = f64::from(u16::try_from(rows)?) / 2.;

    let maze = Canvas::default()
        .x_bounds([-half_columns, half_columns])
        .y_bounds([-half_rows, half_rows])
        .marker(Marker::Braille)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.layer();
            if goal_visible {
                ctx.print(
                    goal_x,
                    goal_y,
                    Span::styled("G", Style::default().fg(Color::Yellow)),
                );
            }
            ctx.print(
                player_x,
                player_y,
                Span::styled("@", Style::default().fg(Color::Cyan)),
            );
        });

    frame.render_widget(maze, space);

    Ok(())
}

/// Draws the status bar with the level details and the key reminder.
fn status(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let fog = if session.fog() { "on" } else { "off" };
    let details = format!(
        "Level {} | {} | {} | Moves {} | Radius {} | Fog {}",
        session.level(),
        session.difficulty(),
        session.algorithm(),
        session.moves(),
        session.view_radius(),
        fog,
    );

    let mut block = Block::bordered()
        .title_bottom("(wasd) move / (+-) radius / (f) fog / (r) reset / (g) new game / (t) trophies / (h) menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP | Borders::BOTTOM);
    if let Some(toast) = &app.toast {
        block = block.title_top(Line::styled(toast.as_str(), Style::default().fg(Color::Yellow)));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Line::raw(details).centered(), inner);
}

/// Draws the level completion banner over the maze.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
fn finished_banner(app: &App, frame: &mut Frame) {
    let area = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .split(frame.area())[0];
    let area = Layout::horizontal([Constraint::Length(36)])
        .flex(Flex::Center)
        .split(area)[0];

    let block = Block::bordered()
        .title("Level complete!")
        .title_bottom("(n) next level")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .border_type(BorderType::Double);
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let lines = Layout::vertical([Constraint::Max(1); 3]).split(inner);
    frame.render_widget(
        Line::raw(format!("Moves taken: {}", app.session.moves())).centered(),
        lines[0],
    );
    frame.render_widget(
        Line::raw(format!(
            "Levels completed: {}",
            app.session.stats().levels_completed
        ))
        .centered(),
        lines[1],
    );
}

/// Renders the achievements list.
///
/// # Errors
///
/// This function may return errors if the list layout cannot be split as expected.
pub(crate) fn achievements(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let space = centered(frame.area(), 60, 40);
    let unlocked = app.session.achievements();
    let title = format!(
        "Achievements {}/{}",
        unlocked.count(),
        Achievement::ALL.len()
    );
    let block = Block::bordered()
        .title_top(title)
        .title_bottom("(h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(space);
    frame.render_widget(block, space);

    let rows =
        Layout::vertical(vec![Constraint::Max(1); Achievement::ALL.len()]).split(inner_space);

    for (index, achievement) in Achievement::ALL.into_iter().enumerate() {
        let row = rows.get(index).ok_or_eyre("failed to get achievement row")?;
        let (mark, style) = if unlocked.is_unlocked(achievement) {
            ("[x]", Style::default().fg(Color::Yellow))
        } else {
            ("[ ]", Style::default().fg(Color::DarkGray))
        };

        frame.render_widget(
            Line::styled(
                format!(
                    "{mark} {} - {}",
                    achievement.title(),
                    achievement.description()
                ),
                style,
            ),
            *row,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Settings;
    use ratatui::{backend::TestBackend, Terminal};

    /// Creates a minimal test app for UI testing.
    fn create_test_app() -> App {
        App::new(Settings {
            difficulty: Difficulty::Easy,
            seed: Some(5),
            ..Settings::default()
        })
        .expect("failed to create app")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 40);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Returns the whole rendered buffer as a single string.
    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_every_screen() {
        let screens = [
            Screen::MainMenu(MainMenuItem::StartGame),
            Screen::MainMenu(MainMenuItem::Quit),
            Screen::OptionsMenu(OptionsMenuItem::Difficulty),
            Screen::OptionsMenu(OptionsMenuItem::Back),
            Screen::DifficultyMenu(Difficulty::Hard),
            Screen::InGame,
            Screen::Achievements,
        ];

        for screen in screens {
            let mut app = create_test_app();
            let mut terminal = create_test_terminal();
            app.screen = screen;

            let result = terminal.draw(|frame| {
                draw(&app, frame).expect("drawing should succeed in test");
            });

            assert!(result.is_ok(), "drawing {:?} should succeed", app.screen);
        }
    }

    #[test]
    fn test_main_menu_shows_entries() {
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| main_menu(frame, MainMenuItem::Options))
            .expect("drawing should succeed");

        let text = rendered(&terminal);
        assert!(text.contains("Start Game"));
        assert!(text.contains("Options"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_in_game_shows_status_and_player() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| in_game(&app, frame).expect("in-game should render"))
            .expect("drawing should succeed");

        let text = rendered(&terminal);
        assert!(text.contains("Level 1"), "status bar shows the level");
        assert!(text.contains("Easy"));
        assert!(text.contains('@'), "player marker is drawn");
        assert!(!text.contains('G'), "goal is hidden by the fog at the start");
    }

    #[test]
    fn test_in_game_without_fog_shows_goal() {
        let mut app = create_test_app();
        let _ = app.session.toggle_fog();
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| in_game(&app, frame).expect("in-game should render"))
            .expect("drawing should succeed");

        assert!(rendered(&terminal).contains('G'));
    }

    #[test]
    fn test_in_game_shows_toast() {
        let mut app = create_test_app();
        app.toast = Some("Achievement unlocked: First Steps".to_owned());
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| in_game(&app, frame).expect("in-game should render"))
            .expect("drawing should succeed");

        assert!(rendered(&terminal).contains("First Steps"));
    }

    #[test]
    fn test_difficulty_menu_lists_tiers() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| {
                difficulty_menu(&app, frame, Difficulty::Normal).expect("menu should render");
            })
            .expect("drawing should succeed");

        let text = rendered(&terminal);
        assert!(text.contains("Easy (12x12)"));
        assert!(text.contains("Normal (20x20)"));
        assert!(text.contains("Hard (30x30)"));
    }

    #[test]
    fn test_achievements_lists_catalogue() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let _ = terminal
            .draw(|frame| achievements(&app, frame).expect("achievements should render"))
            .expect("drawing should succeed");

        let text = rendered(&terminal);
        assert!(text.contains("Achievements 0/5"));
        assert!(text.contains("Brave Heart"));
    }

    #[test]
    fn test_init_menu_sizes() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            assert_eq!(init_menu(frame, MenuType::MainMenu(3)).len(), 3);
            assert_eq!(init_menu(frame, MenuType::OptionsMenu(2)).len(), 2);
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }
}
