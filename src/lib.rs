//! A terminal maze game where every level is carved by one of three randomized generators and
//! explored under a fog of war.
//!
//! The game logic lives in the public modules and can be driven without a terminal: a
//! [`session::Session`] owns the maze of the current level, moves the player through it and keeps
//! the statistics that unlock [`achievements`]. The terminal front end is exposed through [`App`],
//! configured from the command line with [`Cli`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod achievements;
pub mod generator;
pub mod grid;
pub mod navigation;
pub mod session;
pub mod visibility;

mod app;
mod canvas;
mod config;
mod events;
mod types;
mod ui;

pub use app::App;
pub use config::Cli;
