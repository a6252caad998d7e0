use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use grid_snake::app::{GameStateMachine, MenuSelection};
use grid_snake::config::{DEFAULT_GRID, Difficulty, SnakeColor};
use grid_snake::controller::{Controller, Flow};
use grid_snake::error::GameError;
use grid_snake::grid::GridSize;
use grid_snake::input::poll_input;
use grid_snake::renderer;
use grid_snake::settings::{Settings, load_settings, save_settings};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Preselect a difficulty in the menu.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Preselect a snake color in the menu.
    #[arg(long, value_enum)]
    color: Option<SnakeColor>,

    /// Preset the player name (at most 15 characters are kept).
    #[arg(long)]
    name: Option<String>,

    /// Board width in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID.width,
        value_parser = clap::value_parser!(u16).range(1..=200)
    )]
    width: u16,

    /// Board height in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_GRID.height,
        value_parser = clap::value_parser!(u16).range(1..=200)
    )]
    height: u16,

    /// Seed food placement for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Load menu preferences from the settings file and save them on exit.
    #[arg(long)]
    settings: bool,

    /// Write diagnostics to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let bounds = GridSize {
        width: cli.width,
        height: cli.height,
    };
    validate_bounds(bounds)?;

    let selection = initial_selection(&cli);
    let mut machine = match cli.seed {
        Some(seed) => GameStateMachine::new_with_seed(bounds, selection, seed),
        None => GameStateMachine::new(bounds, selection),
    };

    install_panic_hook();
    let result = run(&mut machine);

    if cli.settings {
        if let Err(error) = save_settings(&Settings::from_selection(machine.selection())) {
            tracing::warn!(%error, "failed to save settings");
            eprintln!("Failed to save settings: {error}");
        }
    }

    result
}

fn run(machine: &mut GameStateMachine) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut controller = Controller::new();
    let mut last_tick = Instant::now();

    loop {
        let snapshot = machine.snapshot();
        let form = controller.form();
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, form))?;

        let timeout = machine.tick_interval().saturating_sub(last_tick.elapsed());
        if let Some(input) = poll_input(timeout)? {
            let state_before = machine.state();
            let flow = controller
                .handle(machine, input)
                .map_err(io::Error::other)?;
            if flow == Flow::Quit {
                break;
            }
            if machine.state() != state_before {
                last_tick = Instant::now();
            }
        }

        if last_tick.elapsed() >= machine.tick_interval() {
            machine.tick().map_err(io::Error::other)?;
            last_tick = Instant::now();
        }
    }

    tracing::info!("quit requested");
    Ok(())
}

fn initial_selection(cli: &Cli) -> MenuSelection {
    let mut selection = MenuSelection::default();

    if cli.settings {
        match load_settings() {
            Ok(settings) => settings.apply_to(&mut selection),
            Err(error) => {
                tracing::warn!(%error, "ignoring settings file");
                eprintln!("Ignoring settings file: {error}");
            }
        }
    }

    if let Some(difficulty) = cli.difficulty {
        selection.difficulty = difficulty;
    }
    if let Some(color) = cli.color {
        selection.color = color;
    }
    if let Some(name) = &cli.name {
        selection.name.clone_from(name);
    }

    selection
}

/// Rejects boards that cannot hold the longest goal plus one food cell.
fn validate_bounds(bounds: GridSize) -> io::Result<()> {
    let largest_goal = Difficulty::ALL
        .iter()
        .map(|difficulty| difficulty.win_length())
        .max()
        .unwrap_or(0);

    if bounds.total_cells() <= largest_goal {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            GameError::GridTooSmall {
                width: bounds.width,
                height: bounds.height,
                win_length: largest_goal,
            },
        ));
    }

    Ok(())
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use grid_snake::app::MenuSelection;
    use grid_snake::config::{DEFAULT_GRID, Difficulty};

    use super::{Cli, initial_selection};

    #[test]
    fn defaults_leave_settings_file_untouched() {
        let cli = Cli::try_parse_from(["grid-snake"]).expect("defaults parse");

        assert!(!cli.settings);
        assert_eq!(cli.width, DEFAULT_GRID.width);
        assert_eq!(cli.height, DEFAULT_GRID.height);
        assert_eq!(initial_selection(&cli), MenuSelection::default());
    }

    #[test]
    fn cli_overrides_apply_without_settings_file() {
        let cli = Cli::try_parse_from(["grid-snake", "--difficulty", "hard", "--name", "Ada"])
            .expect("flags parse");

        let selection = initial_selection(&cli);

        assert_eq!(selection.difficulty, Difficulty::Hard);
        assert_eq!(selection.name, "Ada");
    }

    #[test]
    fn settings_flag_is_opt_in() {
        let cli = Cli::try_parse_from(["grid-snake", "--settings"]).expect("flag parses");

        assert!(cli.settings);
    }
}
