use thiserror::Error;

pub type RuleResult<T> = Result<T, RuleError>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown indicator: `{0}`")]
    UnknownIndicator(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("instance store failure: {0}")]
    Store(String),
}
