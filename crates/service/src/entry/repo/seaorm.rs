use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::entry::domain::{Entry, EntryType};
use crate::entry::filter::EntryFilter;
use crate::entry::repository::EntryRepository;
use crate::errors::ServiceError;

/// SeaORM-backed entry repository.
pub struct SeaOrmEntryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl EntryRepository for SeaOrmEntryRepository {
    async fn save(&self, entry: Entry) -> Result<Entry, ServiceError> {
        let saved = models::entry::save(&self.db, entry.into_model()?).await?;
        Entry::try_from(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        models::entry::delete(&self.db, id).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ServiceError> {
        models::entry::find(&self.db, id).await?.map(Entry::try_from).transpose()
    }

    async fn find_matching(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ServiceError> {
        // equality in SQL, substring rule in process
        let rows = models::entry::list(&self.db, &filter.equality()).await?;
        let mut found = Vec::with_capacity(rows.len());
        for row in rows {
            let entry = Entry::try_from(row)?;
            if filter.matches(&entry) {
                found.push(entry);
            }
        }
        Ok(found)
    }

    async fn sum_amount_by_type_and_user(&self, user_id: Uuid, entry_type: EntryType) -> Result<Option<Decimal>, ServiceError> {
        Ok(models::entry::sum_amount_by_type_and_user(&self.db, user_id, entry_type.as_str()).await?)
    }
}
