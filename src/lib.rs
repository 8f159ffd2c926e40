//! Annotates a PGN game with commentary for every half-move.
//!
//! The game is loaded with `pgn-reader`/`shakmaty`, each move is sent to a
//! chat-completion service together with the position before it, and the
//! commented game is written back out as PGN.

pub mod annotate;
pub mod chess;
pub mod commentary;
pub mod config;
pub mod error;
pub mod logging;

pub use annotate::{annotate_file, annotate_game};
pub use commentary::{Commentator, OpenAiCommentator};
pub use config::Config;
pub use error::{AppError, ConfigError, InputError, OutputError, ServiceError};
