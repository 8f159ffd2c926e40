use super::filename::output_file_name;
use super::types::AnnotatedGame;
use crate::error::OutputError;

use log::{debug, info};
use shakmaty::Color;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const LINE_WIDTH: usize = 80;

/// Joins movetext tokens with single spaces, breaking lines before a token
/// that would run past `LINE_WIDTH`.
#[derive(Default)]
struct MovetextWriter {
    out: String,
    line_len: usize,
}

impl MovetextWriter {
    fn token(&mut self, token: &str) {
        let len = token.chars().count();
        if self.line_len > 0 {
            if self.line_len + 1 + len > LINE_WIDTH {
                self.out.push('\n');
                self.line_len = 0;
            } else {
                self.out.push(' ');
                self.line_len += 1;
            }
        }
        self.out.push_str(token);
        self.line_len += len;
    }

    fn finish(mut self) -> String {
        if self.line_len > 0 {
            self.out.push('\n');
        }
        self.out
    }
}

fn escape_tag_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Comment text on a single line, without `}` (which would close the comment).
fn clean_comment(comment: &str) -> String {
    comment
        .replace('}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serializes the game as PGN: tag section, blank line, commented mainline,
/// result marker.
pub fn render_pgn(game: &AnnotatedGame) -> String {
    let mut out = String::new();

    for (key, value) in game.headers.iter() {
        let _ = writeln!(out, "[{} \"{}\"]", key, escape_tag_value(value));
    }
    if !game.headers.is_empty() {
        out.push('\n');
    }

    let mut movetext = MovetextWriter::default();
    let mut needs_number = true;

    for annotated in &game.moves {
        match annotated.turn {
            Color::White => movetext.token(&format!("{}.", annotated.number)),
            Color::Black if needs_number => movetext.token(&format!("{}...", annotated.number)),
            Color::Black => {}
        }
        movetext.token(&annotated.san.to_string());

        let comment = clean_comment(&annotated.comment);
        needs_number = !comment.is_empty();
        if needs_number {
            movetext.token(&format!("{{ {comment} }}"));
        }
    }

    movetext.token(game.result_marker());
    out.push_str(&movetext.finish());
    out
}

/// Writes the game to `dir/{White}_vs_{Black}.pgn`, creating `dir` if needed.
/// An existing file with the same name is overwritten.
pub fn write_annotated_game(game: &AnnotatedGame, dir: &Path) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(output_file_name(&game.headers));
    let write_error = |source| OutputError::Write {
        path: path.clone(),
        source,
    };

    if path.exists() {
        debug!("overwriting '{}'", path.display());
    }

    let file = File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_pgn(game).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(write_error)?;

    info!(
        "wrote {} annotated half-moves to '{}'",
        game.moves.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::board::BoardState;
    use crate::chess::types::{AnnotatedMove, Headers};
    use pretty_assertions::assert_eq;
    use shakmaty::san::San;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn game(headers: &[(&str, &str)], moves: &[(&str, &str)]) -> AnnotatedGame {
        let mut board = BoardState::default();
        let moves = moves
            .iter()
            .map(|(san, comment)| {
                let fen = board.fen();
                let number = board.fullmove_number();
                let turn = board.turn();
                let san: San = san.parse().unwrap();
                let m = san.to_move(board.position()).unwrap();
                AnnotatedMove {
                    number,
                    turn,
                    san: board.play(m),
                    fen,
                    comment: comment.to_string(),
                }
            })
            .collect();

        AnnotatedGame {
            headers: Arc::new(headers.iter().copied().collect::<Headers>()),
            moves,
            outcome: None,
        }
    }

    #[test]
    fn test_render_headers_and_commented_moves() {
        let g = game(
            &[("White", "Alice"), ("Black", "Bob"), ("Result", "1-0")],
            &[("e4", "Central pawn."), ("e5", "Symmetric reply.")],
        );

        assert_eq!(
            render_pgn(&g),
            "[White \"Alice\"]\n\
             [Black \"Bob\"]\n\
             [Result \"1-0\"]\n\
             \n\
             1. e4 { Central pawn. } 1... e5 { Symmetric reply. } 1-0\n"
        );
    }

    #[test]
    fn test_render_zero_moves_is_headers_and_result() {
        let g = game(&[("Event", "Empty")], &[]);
        assert_eq!(render_pgn(&g), "[Event \"Empty\"]\n\n*\n");
    }

    #[test]
    fn test_render_escapes_tag_values() {
        let g = game(&[("Event", r#"The "Big" C:\ Open"#)], &[]);
        assert!(render_pgn(&g).starts_with(r#"[Event "The \"Big\" C:\\ Open"]"#));
    }

    #[test]
    fn test_render_comment_cannot_close_early() {
        let g = game(&[], &[("e4", "Good } move\nwith\ttabs")]);
        assert_eq!(render_pgn(&g), "1. e4 { Good move with tabs } *\n");
    }

    #[test]
    fn test_render_uncommented_black_move_has_no_number() {
        let g = game(&[], &[("e4", ""), ("e5", "")]);
        assert_eq!(render_pgn(&g), "1. e4 e5 *\n");
    }

    #[test]
    fn test_render_wraps_long_movetext() {
        let long = "word ".repeat(30);
        let g = game(&[], &[("e4", &long), ("e5", "short")]);
        let rendered = render_pgn(&g);

        assert!(rendered.lines().count() > 1);
        assert!(rendered.contains("1... e5 { short }"));
    }

    #[test]
    fn test_write_creates_directory_and_named_file() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("Commentated_Games");
        let g = game(
            &[("White", "Alice"), ("Black", "Bob")],
            &[("e4", "a"), ("e5", "b")],
        );

        let path = write_annotated_game(&g, &out_dir).unwrap();
        assert_eq!(path, out_dir.join("Alice_vs_Bob.pgn"));
        assert_eq!(fs::read_to_string(&path).unwrap(), render_pgn(&g));
    }

    #[test]
    fn test_write_fails_when_directory_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let g = game(&[], &[]);
        let err = write_annotated_game(&g, &blocker.join("nested")).unwrap_err();
        assert!(matches!(err, OutputError::CreateDir { .. }));
    }
}
