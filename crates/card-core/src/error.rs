use thiserror::Error;

/// Construction-contract failures. Per-frame updates never error; bad
/// parameters are rejected up front instead.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub(crate) fn require(cond: bool, what: &str) -> Result<(), CardError> {
    if cond {
        Ok(())
    } else {
        Err(CardError::InvalidArgument(what.to_string()))
    }
}
