//! BLOCKFALL terminal front end
//!
//! Drives the engine from a fixed frame loop: key presses become commands,
//! wall-clock time between frames feeds gravity.

mod input;
mod ui;

use anyhow::{Context, Result};
use blockfall::{Game, GameEvent, Settings};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Action, InputHandler};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file to use instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the piece sequence, given as a 64-bit integer.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Board width in cells.
    #[arg(long)]
    cols: Option<usize>,
    /// Board height in cells.
    #[arg(long)]
    rows: Option<usize>,
    /// Directory for the log file (defaults to the system temp directory).
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup tracing to log file
    let session_id: u32 = rand::random();
    let log_dir = args.log_dir.clone().unwrap_or_else(std::env::temp_dir);
    let log_file = format!("blockfall-{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    info!(
        session = %format!("{:08x}", session_id),
        log = %log_dir.join(&log_file).display(),
        "BLOCKFALL starting up"
    );

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(seed) = args.seed {
        settings.game.seed = Some(seed);
    }
    if let Some(cols) = args.cols {
        settings.game.cols = cols;
    }
    if let Some(rows) = args.rows {
        settings.game.rows = rows;
    }

    let game = Game::new(settings.game.clone()).context("invalid game configuration")?;
    let input = InputHandler::from_bindings(&settings.keys);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = terminal
        .clear()
        .map_err(anyhow::Error::from)
        .and_then(|_| run_app(&mut terminal, game, &input));

    // Always try to restore terminal state
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    let game = result?;
    println!("\nThanks for playing BLOCKFALL!");
    println!("Final Score: {}", game.score());
    println!("Level: {} | Lines: {}", game.level(), game.lines());
    println!("Seed: {}", game.seed());
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut game: Game,
    input: &InputHandler,
) -> Result<Game> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input.action_for(key) {
                        Some(Action::Quit) => {
                            info!(score = game.score(), "quit");
                            return Ok(game);
                        }
                        Some(Action::Game(command)) => {
                            game.handle_input(command);
                        }
                        None => {}
                    }
                }
            }
        }

        // Carry sub-millisecond remainders into the next frame
        let elapsed_ms = last_frame.elapsed().as_millis() as u64;
        last_frame += Duration::from_millis(elapsed_ms);
        game.tick(elapsed_ms);

        for event in game.drain_events() {
            if let GameEvent::GameOver { score, level, lines } = event {
                info!(score, level, lines, "board topped out");
            }
        }
    }
}
