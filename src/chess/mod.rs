mod board;
mod filename;
mod reader;
mod types;
mod visitor;
mod writer;

pub use board::BoardState;
pub use filename::{UNKNOWN_PLAYER, output_file_name, player_name, sanitize_filename};
pub use reader::{CompressionMode, load_game, read_first_game};
pub use types::{AnnotatedGame, AnnotatedMove, GameRecord, Headers, MoveList};
pub use visitor::GameVisitor;
pub use writer::{render_pgn, write_annotated_game};
