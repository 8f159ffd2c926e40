use shakmaty::{Chess, Color, Move, san::SanPlus};
use smallvec::SmallVec;
use std::sync::Arc;

pub type MoveList = SmallVec<[Move; 128]>;

/// PGN tag pairs in order of appearance.
///
/// Duplicate keys keep their first value, matching how the tag section is
/// read back by most PGN tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag unless the key is already present.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.get(&key).is_some() {
            return;
        }
        self.0.push((key, value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (key, value) in iter {
            headers.push(key, value);
        }
        headers
    }
}

/// A game as read from the input file. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub headers: Arc<Headers>,
    /// Position before the first move (standard start unless a `FEN` tag was given).
    pub start: Chess,
    /// Mainline moves only; variations are not kept.
    pub moves: MoveList,
    /// Termination marker found in the movetext (`1-0`, `0-1`, `1/2-1/2`, `*`).
    pub outcome: Option<String>,
}

/// One half-move of the output game with its generated comment.
#[derive(Debug, Clone)]
pub struct AnnotatedMove {
    pub number: u32,
    pub turn: Color,
    pub san: SanPlus,
    /// FEN of the position before the move was played.
    pub fen: String,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct AnnotatedGame {
    pub headers: Arc<Headers>,
    pub moves: Vec<AnnotatedMove>,
    pub outcome: Option<String>,
}

impl AnnotatedGame {
    /// Starts an empty annotated game that shares the record's headers.
    pub fn new(record: &GameRecord) -> Self {
        Self {
            headers: Arc::clone(&record.headers),
            moves: Vec::with_capacity(record.moves.len()),
            outcome: record.outcome.clone(),
        }
    }

    pub fn push(&mut self, annotated: AnnotatedMove) {
        self.moves.push(annotated);
    }

    /// Result token closing the movetext: the `Result` tag wins over the
    /// marker parsed from the movetext, `*` when neither is known.
    pub fn result_marker(&self) -> &str {
        self.headers
            .get("Result")
            .filter(|r| !r.trim().is_empty())
            .or(self.outcome.as_deref())
            .unwrap_or("*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(headers: Headers, outcome: Option<&str>) -> GameRecord {
        GameRecord {
            headers: Arc::new(headers),
            start: Chess::default(),
            moves: MoveList::new(),
            outcome: outcome.map(str::to_string),
        }
    }

    #[test]
    fn test_headers_preserve_order() {
        let headers: Headers = [("White", "Alice"), ("Black", "Bob"), ("Event", "Club")]
            .into_iter()
            .collect();

        let keys: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["White", "Black", "Event"]);
    }

    #[test]
    fn test_headers_duplicate_keeps_first_value() {
        let mut headers = Headers::new();
        headers.push("Event", "First");
        headers.push("Event", "Second");

        assert_eq!(headers.get("Event"), Some("First"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_annotated_game_shares_headers() {
        let rec = record([("White", "Alice")].into_iter().collect(), None);
        let game = AnnotatedGame::new(&rec);

        assert!(Arc::ptr_eq(&rec.headers, &game.headers));
    }

    #[test]
    fn test_result_marker_prefers_result_tag() {
        let rec = record([("Result", "1-0")].into_iter().collect(), Some("*"));
        assert_eq!(AnnotatedGame::new(&rec).result_marker(), "1-0");
    }

    #[test]
    fn test_result_marker_falls_back_to_outcome_then_star() {
        let rec = record(Headers::new(), Some("0-1"));
        assert_eq!(AnnotatedGame::new(&rec).result_marker(), "0-1");

        let rec = record(Headers::new(), None);
        assert_eq!(AnnotatedGame::new(&rec).result_marker(), "*");
    }
}
