use thiserror::Error;

/// Failures that callers may want to tell apart. Everything else travels as a plain
/// [`anyhow::Error`] with context attached.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The day exists in the calendar but has no solution yet.
    #[error("day {0} is not implemented yet")]
    NotImplemented(usize),

    #[error("invalid day {0:?}, expected a number between 1 and 25")]
    InvalidDay(String),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("node {0:?} is not part of the network")]
    UnknownNode(String),

    /// A walk exhausted every (node, instruction) state without reaching a terminal node.
    #[error("walk starting at {0:?} never reaches a terminal node")]
    NeverTerminates(String),
}

impl Error {
    /// Shorthand for a [`Error::Parse`] at the 0-based line index `idx`.
    pub fn parse(idx: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line: idx + 1,
            message: message.into(),
        }
    }
}
