use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("missing value for variable '{0}'")]
    MissingVariable(String),

    #[error("variable '{name}' must be {expected}")]
    WrongVariableKind { name: String, expected: &'static str },

    /// A `{` without its `}` (or the reverse), or an empty `{}`.
    #[error("unbalanced brace at byte {position} in template '{template}'")]
    UnclosedBrace { template: String, position: usize },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PromptResult<T> = Result<T, PromptError>;
