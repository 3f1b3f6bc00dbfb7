use axum::http::StatusCode;

/// Storage failure shared by every catalog and store trait.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn status(&self) -> StatusCode {
        match self {
            RepositoryError::Conflict => StatusCode::CONFLICT,
            RepositoryError::NotFound => StatusCode::NOT_FOUND,
            RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
