//! Loading prior conversation for a history placeholder.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PromptError, PromptResult};
use crate::message::Message;

/// Reads a chat history file: one human message per non-empty line.
///
/// Lines are trimmed; blank lines are skipped.
pub fn load_chat_history(path: impl AsRef<Path>) -> PromptResult<Vec<Message>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PromptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let history = parse_chat_history(&text);
    debug!(path = %path.display(), messages = history.len(), "loaded chat history");
    Ok(history)
}

/// Same as [`load_chat_history`] for text already in memory.
pub fn parse_chat_history(text: &str) -> Vec<Message> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Message::human)
        .collect()
}
