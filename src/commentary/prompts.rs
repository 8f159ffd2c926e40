pub const SYSTEM_PROMPT: &str = "You are a chess assistant, skilled in analyzing chess games.";

pub fn move_prompt(fen: &str, san: &str) -> String {
    format!("Given the board position {fen}, provide a short commentary on this move {san}")
}
