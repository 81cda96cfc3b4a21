use crate::EntityId;
use thiserror::Error;

/// Errors surfaced while loading or validating a data document.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data document: {0}")]
    Parse(String),

    #[error("duplicate entity id: {0}")]
    DuplicateEntity(EntityId),
}
