use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarikanError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("A participant named '{0}' already exists")]
    DuplicateParticipant(String),
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),
    #[error("Participant '{0}' is referenced by an expense and cannot be removed")]
    ParticipantInUse(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, WarikanError>;
