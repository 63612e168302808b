use crate::repository::is_unique_violation;

pub mod account;
pub mod message;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("An account with this username already exists")]
    Conflict,

    #[error("Invalid username or password")]
    Unauthorized,

    #[error("Internal database error")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        if is_unique_violation(&error) {
            tracing::debug!(?error, "Rejecting write: username is taken");
            Self::Conflict
        } else {
            Self::Database(error)
        }
    }
}
