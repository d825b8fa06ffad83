use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;
    async fn create_user(&self, name: &str, email: &str) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, AuthUser>>,
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
    }

    impl MockAuthRepository {
        pub fn user_count(&self) -> usize { self.users.lock().unwrap().len() }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
            Ok(self.users.lock().unwrap().values().any(|u| u.email == email))
        }

        async fn create_user(&self, name: &str, email: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == email) {
                return Err(AuthError::EmailTaken);
            }
            let user = AuthUser { id: Uuid::new_v4(), name: name.to_string(), email: email.to_string() };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }
    }
}
