use std::io;

use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Why the message generator produced nothing.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no staged diff to describe")]
    EmptyDiff,
    #[error("language model call failed: {0}")]
    Transport(#[source] AppError),
    #[error("error parsing JSON response: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("response failed validation: {0}")]
    Schema(#[from] ValidationError),
}
