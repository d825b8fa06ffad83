use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Já existe um usuario cadastrado com este email")]
    EmailTaken,
    #[error("Usuario não encontrado")]
    UserNotFound,
    #[error("Senha inválida")]
    InvalidPassword,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::EmailTaken => 1002,
            AuthError::UserNotFound => 1003,
            AuthError::InvalidPassword => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Whether the error is the caller's fault rather than the server's.
    pub fn is_client_error(&self) -> bool { self.code() < 1100 }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => AuthError::Validation(msg),
            models::errors::ModelError::Db(msg) => AuthError::Repository(msg),
        }
    }
}
