use super::types::Headers;
use regex::Regex;
use std::sync::LazyLock;

/// Characters rejected in file names on Windows.
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Replaces each of `< > : " / \ | ? *` with `_`. Length, reserved device
/// names and trailing dots are left alone.
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Player name from a `White`/`Black` tag, `Unknown` when absent, empty or `?`.
pub fn player_name<'a>(headers: &'a Headers, key: &str) -> &'a str {
    match headers.get(key).map(str::trim) {
        None | Some("") | Some("?") => UNKNOWN_PLAYER,
        Some(name) => name,
    }
}

/// `{White}_vs_{Black}.pgn` with both names sanitized.
pub fn output_file_name(headers: &Headers) -> String {
    format!(
        "{}_vs_{}.pgn",
        sanitize_filename(player_name(headers, "White")),
        sanitize_filename(player_name(headers, "Black"))
    )
}
