use thiserror::Error;

use crate::auth::errors::AuthError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A rule the caller broke; the message is shown to the client as-is.
    #[error("{0}")]
    BusinessRule(String),
    /// Caller bug, such as updating an entry that was never stored.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn business(msg: impl Into<String>) -> Self { Self::BusinessRule(msg.into()) }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(_)
            | AuthError::EmailTaken
            | AuthError::UserNotFound
            | AuthError::InvalidPassword => ServiceError::BusinessRule(e.to_string()),
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                ServiceError::Db(e.to_string())
            }
        }
    }
}
