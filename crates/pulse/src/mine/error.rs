use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    #[error("Empty token sequence")]
    EmptySequence,

    #[error("Invalid input: short sequence has {short} tokens, long sequence has {long}")]
    InvalidInput { short: usize, long: usize },
}
