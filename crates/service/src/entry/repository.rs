use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{Entry, EntryType};
use super::filter::EntryFilter;
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

/// Persistence for entries.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert or replace; the returned entry always carries an id.
    async fn save(&self, entry: Entry) -> Result<Entry, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ServiceError>;
    async fn find_matching(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ServiceError>;
    /// `None` when the user has no entries of that type.
    async fn sum_amount_by_type_and_user(&self, user_id: Uuid, entry_type: EntryType) -> Result<Option<Decimal>, ServiceError>;
}

/// Resolves the owner of an entry.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError>;
}

/// In-memory repositories for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockEntryRepository {
        entries: Mutex<HashMap<Uuid, Entry>>,
    }

    impl MockEntryRepository {
        pub fn len(&self) -> usize { self.entries.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl EntryRepository for MockEntryRepository {
        async fn save(&self, mut entry: Entry) -> Result<Entry, ServiceError> {
            let id = *entry.id.get_or_insert_with(Uuid::new_v4);
            self.entries.lock().unwrap().insert(id, entry.clone());
            Ok(entry)
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.entries.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ServiceError> {
            Ok(self.entries.lock().unwrap().get(&id).cloned())
        }

        async fn find_matching(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ServiceError> {
            let entries = self.entries.lock().unwrap();
            let mut found: Vec<Entry> = entries.values().filter(|e| filter.matches(e)).cloned().collect();
            found.sort_by_key(|e| (e.year, e.month));
            Ok(found)
        }

        async fn sum_amount_by_type_and_user(&self, user_id: Uuid, entry_type: EntryType) -> Result<Option<Decimal>, ServiceError> {
            let entries = self.entries.lock().unwrap();
            let amounts: Vec<Decimal> = entries
                .values()
                .filter(|e| e.user_id == Some(user_id) && e.entry_type == Some(entry_type))
                .filter_map(|e| e.amount)
                .collect();
            if amounts.is_empty() {
                return Ok(None);
            }
            Ok(Some(amounts.into_iter().sum()))
        }
    }

    #[derive(Default)]
    pub struct MockUserLookup {
        users: Mutex<HashMap<Uuid, AuthUser>>,
    }

    impl MockUserLookup {
        /// Register a user under a fresh id and return it.
        pub fn add(&self, name: &str, email: &str) -> AuthUser {
            let user = AuthUser { id: Uuid::new_v4(), name: name.to_string(), email: email.to_string() };
            self.users.lock().unwrap().insert(user.id, user.clone());
            user
        }
    }

    #[async_trait]
    impl UserLookup for MockUserLookup {
        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }
    }
}
