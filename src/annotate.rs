use crate::chess::{
    AnnotatedGame, AnnotatedMove, BoardState, GameRecord, load_game, write_annotated_game,
};
use crate::commentary::Commentator;
use crate::error::{AppError, ServiceError};

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Requests commentary for every mainline move of `record`, in order.
///
/// `board` must start at the record's starting position. For each move the
/// FEN is taken before the move is played and the SAN is derived from the
/// same position; `on_move` then sees the annotated move and the board after
/// it. The first service error aborts the loop.
pub fn annotate_game<C, F>(
    record: &GameRecord,
    mut board: BoardState,
    commentator: &C,
    mut on_move: F,
) -> Result<AnnotatedGame, ServiceError>
where
    C: Commentator + ?Sized,
    F: FnMut(&AnnotatedMove, &BoardState),
{
    let mut annotated = AnnotatedGame::new(record);

    for (ply, m) in record.moves.iter().enumerate() {
        let fen = board.fen();
        let number = board.fullmove_number();
        let turn = board.turn();
        let san = board.play(m.clone());

        debug!("ply {}: {san}", ply + 1);
        let comment = commentator.comment(&fen, &san.to_string())?;

        let annotated_move = AnnotatedMove {
            number,
            turn,
            san,
            fen,
            comment,
        };
        on_move(&annotated_move, &board);
        annotated.push(annotated_move);
    }

    Ok(annotated)
}

/// Loads the first game in `input`, annotates it and writes the result into
/// `output_dir`. Returns the path of the written file.
///
/// Nothing is written unless every move received its commentary.
pub fn annotate_file<C, F>(
    input: &Path,
    output_dir: &Path,
    commentator: &C,
    on_move: F,
) -> Result<PathBuf, AppError>
where
    C: Commentator + ?Sized,
    F: FnMut(&AnnotatedMove, &BoardState),
{
    let (record, board) = load_game(input)?;
    let annotated = annotate_game(&record, board, commentator, on_move)?;

    let path = write_annotated_game(&annotated, output_dir)?;
    info!(
        "annotated {} half-moves from '{}'",
        annotated.moves.len(),
        input.display()
    );
    Ok(path)
}
