//! Core game state machine
//!
//! A game is always observed in [`Phase::Falling`]. Gravity and player
//! commands may push it through locking, clearing, spawning and game over,
//! and the game runs those transitions to completion before
//! returning control to the driver.

use crate::board::Board;
use crate::config::GameConfig;
use crate::generator::PieceGenerator;
use crate::piece::Piece;
use crate::score::Progress;
use crate::tetromino::PieceType;
use anyhow::Result;
use tracing::{debug, info};

/// Where the game is in its spawn → fall → lock → clear cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Active piece responds to gravity and commands
    Falling,
    /// Piece could not fall and is being written to the board
    Locking,
    /// Full rows are cleared and progression updated
    Cleared,
    /// A new piece enters at the top
    Spawning,
    /// Spawn was blocked; everything resets
    GameOver,
}

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Notifications about transitions, for the driver to observe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Locked { piece: PieceType },
    LinesCleared { lines: usize, score: u64 },
    LevelUp { level: u32, fall_interval_ms: u32 },
    /// The board filled up and the game restarted from scratch
    GameOver { score: u64, level: u32, lines: u32 },
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    /// Current falling piece
    active: Piece,
    progress: Progress,
    generator: PieceGenerator,
    phase: Phase,
    /// Time accumulated since the last gravity step
    since_last_fall_ms: u64,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a new game; the seed comes from the config or is random
    pub fn new(config: GameConfig) -> Result<Self> {
        let generator = match config.seed {
            Some(seed) => PieceGenerator::new(seed),
            None => PieceGenerator::from_entropy(),
        };
        Self::with_generator(config, generator)
    }

    /// Create a new game drawing pieces from `generator`
    pub fn with_generator(config: GameConfig, mut generator: PieceGenerator) -> Result<Self> {
        config.validate()?;

        let board = Board::new(config.cols, config.rows);
        let active = Piece::spawn(generator.next(), config.cols);
        let progress = Progress::new(&config);
        info!(
            seed = generator.seed(),
            cols = config.cols,
            rows = config.rows,
            "new game"
        );

        Ok(Self {
            config,
            board,
            active,
            progress,
            generator,
            phase: Phase::Falling,
            since_last_fall_ms: 0,
            events: Vec::new(),
        })
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Once more than the fall interval has accumulated, the piece falls (or
    /// locks) one step and the clock restarts. Returns true if a step ran.
    /// Any events raised are queued until [`Game::drain_events`] is called.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.since_last_fall_ms = self.since_last_fall_ms.saturating_add(elapsed_ms);
        if self.since_last_fall_ms <= self.progress.fall_interval_ms as u64 {
            return false;
        }
        self.since_last_fall_ms = 0;
        self.step_gravity();
        true
    }

    /// Move the piece down one row, or lock it if it cannot fall
    pub fn step_gravity(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }
        if self.active.can_move_by(&self.board, 0, 1) {
            self.active.move_by(0, 1);
        } else {
            self.phase = Phase::Locking;
            self.settle();
        }
    }

    /// Process a player command, returns true if the piece moved or rotated
    ///
    /// Commands never lock the piece, so no events are queued here; locking
    /// is left to [`Game::tick`].
    pub fn handle_input(&mut self, command: Command) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match command {
            Command::MoveLeft => self.try_shift(-1, 0),
            Command::MoveRight => self.try_shift(1, 0),
            Command::SoftDrop => self.try_shift(0, 1),
            Command::Rotate => self.active.rotate_clockwise(&self.board),
        }
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        if self.active.can_move_by(&self.board, dx, dy) {
            self.active.move_by(dx, dy);
            true
        } else {
            false
        }
    }

    /// Run phase transitions until the game is back in `Falling`
    fn settle(&mut self) {
        loop {
            self.phase = match self.phase {
                Phase::Falling => return,
                Phase::Locking => self.lock_piece(),
                Phase::Cleared => self.clear_rows(),
                Phase::Spawning => self.spawn_piece(),
                Phase::GameOver => self.reset_after_game_over(),
            };
        }
    }

    fn lock_piece(&mut self) -> Phase {
        // A piece stuck partly above the grid cannot be written to it
        if self.active.is_above_grid() {
            debug!(piece = self.active.piece_type.name(), "lock out");
            return Phase::GameOver;
        }

        self.board.lock(&self.active.cells());
        debug!(
            piece = self.active.piece_type.name(),
            x = self.active.x,
            y = self.active.y,
            "piece locked"
        );
        self.events.push(GameEvent::Locked {
            piece: self.active.piece_type,
        });
        Phase::Cleared
    }

    fn clear_rows(&mut self) -> Phase {
        let lines = self.board.clear_full_rows();
        let leveled_up = self.progress.apply_clear(lines, &self.config);

        if lines > 0 {
            info!(lines, score = self.progress.score, "lines cleared");
            self.events.push(GameEvent::LinesCleared {
                lines,
                score: self.progress.score,
            });
        }
        if leveled_up {
            info!(
                level = self.progress.level,
                fall_interval_ms = self.progress.fall_interval_ms,
                "level up"
            );
            self.events.push(GameEvent::LevelUp {
                level: self.progress.level,
                fall_interval_ms: self.progress.fall_interval_ms,
            });
        }
        Phase::Spawning
    }

    fn spawn_piece(&mut self) -> Phase {
        self.active = Piece::spawn(self.generator.next(), self.config.cols);
        if !self.active.can_move_by(&self.board, 0, 0) {
            debug!(piece = self.active.piece_type.name(), "spawn blocked");
            return Phase::GameOver;
        }
        debug!(piece = self.active.piece_type.name(), "spawned");
        Phase::Falling
    }

    fn reset_after_game_over(&mut self) -> Phase {
        info!(
            score = self.progress.score,
            level = self.progress.level,
            lines = self.progress.lines,
            "game over, restarting"
        );
        self.events.push(GameEvent::GameOver {
            score: self.progress.score,
            level: self.progress.level,
            lines: self.progress.lines,
        });

        self.board.reset();
        self.progress = Progress::new(&self.config);
        self.since_last_fall_ms = 0;
        Phase::Spawning
    }

    /// Start over with an empty board, keeping the piece sequence going
    pub fn restart(&mut self) {
        self.board.reset();
        self.progress = Progress::new(&self.config);
        self.since_last_fall_ms = 0;
        self.phase = Phase::Spawning;
        self.settle();
    }

    /// Take all events since the last call
    ///
    /// The queue is never trimmed, so a driver should drain it once per
    /// frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    /// Absolute cells of the falling piece
    pub fn active_cells(&self) -> [(i32, i32); 4] {
        self.active.cells()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the piece sequence, for replaying a game
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }
}
