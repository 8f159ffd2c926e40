use super::{board::BoardState, types::GameRecord, visitor::GameVisitor};
use crate::error::InputError;

use log::{debug, info};
use pgn_reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read + Send>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("zst") || ext.eq_ignore_ascii_case("zstd") => {
                Self::Zstd
            }
            _ => Self::Plain,
        }
    }
}

fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput, InputError> {
    let open_error = |source| InputError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;

    match compression {
        CompressionMode::Plain => Ok(Box::new(file)),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(open_error),
    }
}

/// Parses the first game of `input`. Any further games are ignored.
///
/// pgn-reader buffers internally, so `input` should not be wrapped in a
/// `BufReader`.
pub fn read_first_game<R: Read>(input: R, source: &Path) -> Result<GameRecord, InputError> {
    let mut reader = Reader::new(input);
    let mut visitor = GameVisitor::new();

    match reader.read_game(&mut visitor) {
        Ok(Some(game)) => game,
        Ok(None) => Err(InputError::NoGame {
            path: source.to_path_buf(),
        }),
        Err(source_err) => Err(InputError::Parse {
            path: source.to_path_buf(),
            source: source_err,
        }),
    }
}

/// Loads the first game from `path` and a board at its starting position.
pub fn load_game(path: &Path) -> Result<(GameRecord, BoardState), InputError> {
    let compression = CompressionMode::from_path(path);
    debug!("opening '{}' ({compression:?})", path.display());

    let input = open_input_stream(path, compression)?;
    let game = read_first_game(input, path)?;

    info!(
        "loaded '{}': {} tags, {} half-moves",
        path.display(),
        game.headers.len(),
        game.moves.len()
    );

    let board = BoardState::new(game.start.clone());
    Ok((game, board))
}
