use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, name: u.name, email: u.email }
}

fn to_credentials(c: models::user_credentials::Model) -> Credentials {
    Credentials { user_id: c.user_id, password_hash: c.password, password_algorithm: c.password_algorithm }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(models::user::find_by_email(&self.db, email).await?.map(to_user))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_user))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        Ok(models::user::exists_by_email(&self.db, email).await?)
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, name, email).await?;
        Ok(to_user(created))
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        Ok(models::user_credentials::find_by_user(&self.db, user_id).await?.map(to_credentials))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(to_credentials(c))
    }
}
