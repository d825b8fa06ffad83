use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use async_trait::async_trait;
use jsonwebtoken::{encode, Header as JwtHeader, EncodingKey};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};
use uuid::Uuid;

use common::metrics::record_auth_attempt;

use super::domain::{RegisterInput, LoginInput, AuthUser, AuthSession};
use super::errors::AuthError;
use super::repository::AuthRepository;
use crate::entry::repository::UserLookup;
use crate::errors::ServiceError;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    /// `plain` or `argon2`; applies to newly stored passwords only.
    pub password_algorithm: String,
}

impl Default for AuthConfig {
    fn default() -> Self { Self { jwt_secret: None, password_algorithm: "plain".into() } }
}

impl From<&configs::AuthSettings> for AuthConfig {
    fn from(s: &configs::AuthSettings) -> Self {
        Self { jwt_secret: s.jwt_secret.clone(), password_algorithm: s.password_algorithm.clone() }
    }
}

fn hash_password(password: &str, algorithm: &str) -> Result<String, AuthError> {
    match algorithm {
        "plain" => Ok(password.to_string()),
        "argon2" => {
            let salt = SaltString::generate(&mut OsRng);
            Ok(Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| AuthError::HashError(e.to_string()))?
                .to_string())
        }
        other => Err(AuthError::HashError(format!("unsupported password algorithm: {}", other))),
    }
}

fn verify_password(password: &str, stored: &str, algorithm: &str) -> Result<bool, AuthError> {
    match algorithm {
        "plain" => Ok(password == stored),
        "argon2" => {
            let parsed = PasswordHash::new(stored).map_err(|e| AuthError::HashError(e.to_string()))?;
            Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        }
        other => Err(AuthError::HashError(format!("unsupported password algorithm: {}", other))),
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Fail when the email already belongs to a user.
    pub async fn validate_email(&self, email: &str) -> Result<(), AuthError> {
        if self.repo.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }
        Ok(())
    }

    /// Register a new user. Email uniqueness is checked before anything is stored.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { name: "usuario".into(), email: "usuario@email.com".into(), password: "senha".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "usuario@email.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if let Err(e) = self.validate_email(&input.email).await {
            debug!("email already registered");
            return Err(e);
        }
        models::user::validate_email(&input.email)?;
        models::user::validate_name(&input.name)?;

        let hash = hash_password(&input.password, &self.cfg.password_algorithm)?;
        let user = self.repo.create_user(&input.name, &input.email).await?;
        let _cred = self.repo.upsert_password(user.id, hash, self.cfg.password_algorithm.clone()).await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: Some("secret".into()), password_algorithm: "argon2".into() });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.authenticate(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn authenticate(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let res = self.authenticate_inner(input).await;
        let outcome = match &res {
            Ok(_) => "ok",
            Err(AuthError::UserNotFound) => "user_not_found",
            Err(AuthError::InvalidPassword) => "invalid_password",
            Err(_) => "error",
        };
        record_auth_attempt(outcome);
        res
    }

    async fn authenticate_inner(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // a user without credentials cannot match any password
        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::InvalidPassword)?;

        if !verify_password(&input.password, &cred.password_hash, &cred.password_algorithm)? {
            return Err(AuthError::InvalidPassword);
        }

        let mut token = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            #[derive(serde::Serialize)]
            struct Claims { sub: String, uid: String, exp: usize }
            let exp = (chrono::Utc::now() + chrono::Duration::hours(12)).timestamp() as usize;
            let claims = Claims { sub: user.email.clone(), uid: user.id.to_string(), exp };
            token = Some(encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| AuthError::TokenError(e.to_string()))?);
        }

        info!(user_id = %user.id, "user_authenticated");
        Ok(AuthSession { user, token })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        self.repo.find_user_by_id(id).await
    }
}

#[async_trait]
impl<R: AuthRepository + ?Sized> UserLookup for AuthService<R> {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError> {
        Ok(self.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn service(algorithm: &str) -> (Arc<MockAuthRepository>, AuthService<MockAuthRepository>) {
        let repo = Arc::new(MockAuthRepository::default());
        let cfg = AuthConfig { jwt_secret: None, password_algorithm: algorithm.into() };
        (repo.clone(), AuthService::new(repo, cfg))
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput { name: "usuario".into(), email: email.into(), password: password.into() }
    }

    #[tokio::test]
    async fn taken_email_is_rejected_without_persisting() {
        let (repo, svc) = service("plain");
        svc.register(input("usuario@email.com", "senha")).await.unwrap();
        let err = svc.register(input("usuario@email.com", "outra")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.to_string(), "Já existe um usuario cadastrado com este email");
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn validate_email_passes_for_free_address() {
        let (_repo, svc) = service("plain");
        assert!(svc.validate_email("livre@email.com").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_email_fails_authentication() {
        let (_repo, svc) = service("plain");
        let err = svc.authenticate(LoginInput { email: "nada@email.com".into(), password: "x".into() }).await.unwrap_err();
        assert_eq!(err.to_string(), "Usuario não encontrado");
    }

    #[tokio::test]
    async fn wrong_password_fails_authentication() {
        let (_repo, svc) = service("plain");
        svc.register(input("usuario@email.com", "senha")).await.unwrap();
        let err = svc.authenticate(LoginInput { email: "usuario@email.com".into(), password: "errada".into() }).await.unwrap_err();
        assert_eq!(err.to_string(), "Senha inválida");
    }

    #[tokio::test]
    async fn plain_mode_stores_password_verbatim() {
        let (repo, svc) = service("plain");
        let user = svc.register(input("usuario@email.com", "senha")).await.unwrap();
        let cred = repo.get_credentials(user.id).await.unwrap().unwrap();
        assert_eq!(cred.password_hash, "senha");
        assert_eq!(cred.password_algorithm, "plain");
        let session = svc.authenticate(LoginInput { email: "usuario@email.com".into(), password: "senha".into() }).await.unwrap();
        assert!(session.token.is_none());
    }

    #[tokio::test]
    async fn argon2_mode_stores_phc_hash() {
        let (repo, svc) = service("argon2");
        let user = svc.register(input("usuario@email.com", "senha")).await.unwrap();
        let cred = repo.get_credentials(user.id).await.unwrap().unwrap();
        assert!(cred.password_hash.starts_with("$argon2"));
        let session = svc.authenticate(LoginInput { email: "usuario@email.com".into(), password: "senha".into() }).await.unwrap();
        assert_eq!(session.user.id, user.id);
    }

    #[tokio::test]
    async fn invalid_email_format_is_rejected() {
        let (repo, svc) = service("plain");
        let err = svc.register(input("sem-arroba", "senha")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn acts_as_owner_lookup() {
        let (_repo, svc) = service("plain");
        let user = svc.register(input("usuario@email.com", "senha")).await.unwrap();
        assert_eq!(svc.find_user_by_id(user.id).await.unwrap(), Some(user));
        assert_eq!(svc.find_user_by_id(Uuid::new_v4()).await.unwrap(), None);
    }
}
