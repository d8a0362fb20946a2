use thiserror::Error;

/// Misuse of the chain API or an invalid level configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("selector chain must have at least one level")]
    NoLevels,

    #[error("duplicate level key `{0}`")]
    DuplicateKey(&'static str),

    #[error("level `{level}` depends on `{parent}`, which is not an earlier level")]
    InvalidDependency {
        level: &'static str,
        parent: &'static str,
    },

    #[error("level index {0} is out of range")]
    OutOfRange(usize),

    #[error("level `{0}` cannot be selected before the level above it")]
    UnresolvedAncestor(&'static str),

    #[error("path of {given} items does not fit a chain of {len} levels")]
    PathTooLong { given: usize, len: usize },
}

/// Failure of a list-resource fetch; stored on the node as a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Request failed: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}
