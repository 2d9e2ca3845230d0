// Batch image resizer: window by default, terminal with --headless
mod cli;
mod gui;
mod headless;
mod logging;

use clap::Parser;
use cli::Cli;
use gui::LaunchOptions;
use std::process;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logger();

    if cli.headless {
        let folder = cli.folder.unwrap_or_default();
        process::exit(headless::run(&folder, &cli.percent));
    }

    gui::run(LaunchOptions {
        folder: cli.folder,
        percent: cli.percent,
    })?;

    Ok(())
}
