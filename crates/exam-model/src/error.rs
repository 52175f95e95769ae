use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid tenant id: {0:?}")]
    InvalidTenantId(String),
    #[error("invalid class id: {0:?}")]
    InvalidClassId(String),
    #[error("invalid question id: {0:?}")]
    InvalidQuestionId(String),
    #[error("invalid option id: {0:?}")]
    InvalidOptionId(String),
    #[error("invalid artifact id: {0}")]
    InvalidArtifactId(String),
    #[error("unknown section category: {0:?}")]
    UnknownCategory(String),
    #[error("unknown difficulty mix: {0:?}")]
    UnknownDifficulty(String),
}
