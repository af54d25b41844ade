use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Incorrect arguments: method expects {expected}, you entered {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Incorrect argument {position} {name}: expected {expected}")]
    TypeMismatch {
        position: usize,
        name: String,
        expected: String,
    },

    #[error("Network and contract are not configured, run `init` first")]
    MissingConfiguration,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    External(#[from] anyhow::Error),
}

impl ConsoleError {
    /// Errors raised before a command is known to the dispatcher.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ConsoleError::EmptyInput | ConsoleError::ParseError(_))
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
