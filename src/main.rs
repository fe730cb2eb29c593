use std::fs::File;
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use grid_snake::controller::{Controller, run};
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::input::CrosstermInput;
use grid_snake::renderer::TerminalRenderer;
use grid_snake::terminal_runtime::{TerminalSession, restore_terminal};
use grid_snake::theme::load_theme;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for food and wall placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON theme file to use instead of the user or built-in theme.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug or trace.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let theme = load_theme(cli.theme.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("starting grid-snake with seed {seed}, theme '{}'", theme.name);

    install_panic_hook();

    let session = TerminalSession::enter()?;
    let renderer = TerminalRenderer::new(session, theme);
    let mut controller = Controller::new(GameState::new_with_seed(seed), renderer);
    run(&mut controller, &mut CrosstermInput)?;

    info!("exiting");
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let Some(path) = cli.log_file.as_ref() else {
        return Ok(());
    };

    WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
