use actor_core::ScreenplayError;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum RecErrorKind {
    #[error("recipe '{0}' not found")]
    NotFound(String),
    #[error("missing parameter '{0}'")]
    MissingParameter(String),
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("recipe '{0}' is already registered")]
    Conflict(String),
    #[error(transparent)]
    Task(#[from] ScreenplayError),
}

#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct RecError(pub RecErrorKind);

impl RecError {
    pub fn new(kind: RecErrorKind) -> Self {
        Self(kind)
    }

    pub fn kind(&self) -> &RecErrorKind {
        &self.0
    }
}

impl From<RecErrorKind> for RecError {
    fn from(kind: RecErrorKind) -> Self {
        RecError(kind)
    }
}

impl From<ScreenplayError> for RecError {
    fn from(err: ScreenplayError) -> Self {
        RecError(RecErrorKind::Task(err))
    }
}

pub type RecResult<T> = Result<T, RecError>;
