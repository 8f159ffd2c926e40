//! Per-move commentary from a chat-completion service.

mod openai;
pub mod prompts;

pub use openai::OpenAiCommentator;

use crate::error::ServiceError;

/// Produces free-text commentary for one move.
///
/// `fen` describes the position before the move, `san` the move itself.
pub trait Commentator {
    fn comment(&self, fen: &str, san: &str) -> Result<String, ServiceError>;
}
