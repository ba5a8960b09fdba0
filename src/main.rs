//! This crate contains the source code for the binary for the game mistmaze.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mistmaze::{App, Cli};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    cli.init_logging()?;

    let mut terminal = ratatui::init();
    let result = App::new(cli.settings()).and_then(|mut app| app.run(&mut terminal));
    ratatui::restore();

    result
}
