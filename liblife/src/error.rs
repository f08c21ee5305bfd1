use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    #[error("unknown cell character {ch:?} at line {line}, column {column}")]
    ParsePattern { ch: char, line: usize, column: usize },

    #[error("malformed rulestring {0:?}")]
    ParseRule(String),

    #[error("invalid rule: {0}")]
    InvalidRule(String),
}
