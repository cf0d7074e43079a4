use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown exam type: {0}")]
    UnknownExamType(String),
}
