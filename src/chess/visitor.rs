use super::types::{GameRecord, Headers, MoveList};
use crate::error::InputError;

use pgn_reader::{Outcome, RawTag, SanPlus, Skip, Visitor};
use shakmaty::{CastlingMode, Chess, Position, fen::Fen, san::San};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Streaming PGN visitor (pgn-reader).
///
/// Collects the tag section into [`Headers`] and resolves every mainline SAN
/// against the running position, so the resulting [`GameRecord`] only holds
/// legal moves. Variations, NAGs and existing comments are skipped.
#[derive(Default)]
pub struct GameVisitor;

#[derive(Default)]
pub struct TagSection {
    headers: Headers,
    fen: Option<String>,
    chess960: Option<bool>,
}

pub struct Mainline {
    headers: Headers,
    start: Chess,
    pos: Chess,
    moves: MoveList,
    outcome: Option<String>,
}

impl GameVisitor {
    pub fn new() -> Self {
        Self
    }
}

fn start_position(fen: &str, chess960: bool) -> Result<Chess, InputError> {
    let invalid = |reason: String| InputError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };

    let setup: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    setup
        .into_position::<Chess>(CastlingMode::from_chess960(chess960))
        .map_err(|e| invalid(e.to_string()))
}

impl Visitor for GameVisitor {
    type Tags = TagSection;
    type Movetext = Mainline;
    type Output = Result<GameRecord, InputError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(TagSection::default())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let value = String::from_utf8_lossy(&value.decode()).into_owned();

        // First occurrence wins, matching what `Headers` keeps and the writer emits.
        match key {
            b"FEN" if tags.fen.is_none() => tags.fen = Some(value.clone()),
            b"Variant" if tags.chess960.is_none() => {
                let variant = value.to_ascii_lowercase();
                tags.chess960 = Some(variant.contains("960") || variant.contains("fischerandom"));
            }
            _ => {}
        }

        tags.headers.push(String::from_utf8_lossy(key), value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let start = match tags.fen.as_deref() {
            Some(fen) => match start_position(fen, tags.chess960.unwrap_or(false)) {
                Ok(pos) => pos,
                Err(err) => return ControlFlow::Break(Err(err)),
            },
            None => Chess::default(),
        };

        ControlFlow::Continue(Mainline {
            headers: tags.headers,
            pos: start.clone(),
            start,
            moves: MoveList::new(),
            outcome: None,
        })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        if matches!(san.san, San::Null) {
            return ControlFlow::Break(Err(InputError::IllegalMove {
                ply: movetext.moves.len() + 1,
                san: san.to_string(),
                reason: "null moves are not supported".to_string(),
            }));
        }

        match san.san.to_move(&movetext.pos) {
            Ok(m) => {
                movetext.moves.push(m.clone());
                movetext.pos.play_unchecked(m);
                ControlFlow::Continue(())
            }
            Err(err) => ControlFlow::Break(Err(InputError::IllegalMove {
                ply: movetext.moves.len() + 1,
                san: san.to_string(),
                reason: err.to_string(),
            })),
        }
    }

    fn outcome(
        &mut self,
        movetext: &mut Self::Movetext,
        outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        movetext.outcome = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        Ok(GameRecord {
            headers: Arc::new(movetext.headers),
            start: movetext.start,
            moves: movetext.moves,
            outcome: movetext.outcome,
        })
    }
}
