//! BLOCKFALL - falling-block puzzle engine
//!
//! The engine is a synchronous state machine. A driver calls
//! [`Game::tick`] with elapsed time and [`Game::handle_input`] for each
//! player command, then reads the board, falling piece and score back out.
//! Locks, clears, level ups and game overs are queued as [`GameEvent`]s
//! until the driver drains them.
//!
//! ```
//! use blockfall::{Command, Game, GameConfig};
//!
//! let config = GameConfig {
//!     seed: Some(42),
//!     ..GameConfig::default()
//! };
//! let mut game = Game::new(config).unwrap();
//! game.handle_input(Command::MoveLeft);
//! game.tick(16);
//! assert_eq!(game.score(), 0);
//! for event in game.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod generator;
pub mod piece;
pub mod score;
pub mod tetromino;

pub use board::{Board, Cell};
pub use config::{GameConfig, KeyBindings, Settings};
pub use game::{Command, Game, GameEvent, Phase};
pub use generator::PieceGenerator;
pub use piece::Piece;
pub use tetromino::{PieceType, Rotation};
