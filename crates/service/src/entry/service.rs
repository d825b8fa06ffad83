use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{error, info, instrument};
use uuid::Uuid;

use common::metrics::record_entry_op;

use super::domain::{Entry, EntryStatus, EntryType};
use super::filter::EntryFilter;
use super::repository::{EntryRepository, UserLookup};
use super::validation::validate;
use crate::errors::ServiceError;

pub const MSG_OWNER_NOT_FOUND: &str = "Usuario não encontrado para id informado.";

/// Scale of the `entry.amount` column.
const AMOUNT_SCALE: u32 = 2;

/// Entry business service independent of web framework.
pub struct EntryService<R: EntryRepository + ?Sized, U: UserLookup + ?Sized> {
    repo: Arc<R>,
    users: Arc<U>,
}

fn outcome<T>(op: &'static str, res: &Result<T, ServiceError>) {
    match res {
        Ok(_) => record_entry_op(op, "ok"),
        Err(ServiceError::BusinessRule(_)) => record_entry_op(op, "rejected"),
        Err(ServiceError::Precondition(msg)) => {
            error!(op, reason = *msg, "entry precondition violated");
            record_entry_op(op, "error");
        }
        Err(_) => record_entry_op(op, "error"),
    }
}

impl<R: EntryRepository + ?Sized, U: UserLookup + ?Sized> EntryService<R, U> {
    pub fn new(repo: Arc<R>, users: Arc<U>) -> Self { Self { repo, users } }

    /// Round the amount to the stored scale, resolve the owner when an id is
    /// given, then validate. An absent user id is left to the validator.
    async fn prepare(&self, entry: &mut Entry) -> Result<(), ServiceError> {
        entry.amount = entry
            .amount
            .map(|a| a.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero));
        if let Some(user_id) = entry.user_id {
            if self.users.find_user_by_id(user_id).await?.is_none() {
                return Err(ServiceError::business(MSG_OWNER_NOT_FOUND));
            }
        }
        validate(entry)
    }

    /// Validate and store a new entry. The status is always PENDING and the
    /// registration date is today.
    #[instrument(skip(self, entry), fields(user_id = ?entry.user_id))]
    pub async fn create(&self, entry: Entry) -> Result<Entry, ServiceError> {
        let res = self.create_inner(entry).await;
        outcome("create", &res);
        res
    }

    async fn create_inner(&self, mut entry: Entry) -> Result<Entry, ServiceError> {
        self.prepare(&mut entry).await?;
        entry.id = None;
        entry.status = Some(EntryStatus::Pending);
        entry.registered_on = Some(chrono::Utc::now().date_naive());
        let saved = self.repo.save(entry).await?;
        info!(entry_id = ?saved.id, user_id = ?saved.user_id, "entry_created");
        Ok(saved)
    }

    /// Replace a stored entry. The supplied status is kept as is; the
    /// registration date comes from the stored record when there is one.
    #[instrument(skip(self, entry), fields(entry_id = ?entry.id, status = ?entry.status))]
    pub async fn update(&self, entry: Entry) -> Result<Entry, ServiceError> {
        let res = self.update_inner(entry).await;
        outcome("update", &res);
        res
    }

    async fn update_inner(&self, mut entry: Entry) -> Result<Entry, ServiceError> {
        let id = entry.id.ok_or(ServiceError::Precondition("entry id is required for update"))?;
        self.prepare(&mut entry).await?;
        if let Some(stored) = self.repo.find_by_id(id).await? {
            entry.registered_on = stored.registered_on;
        }
        let saved = self.repo.save(entry).await?;
        info!(entry_id = %id, "entry_updated");
        Ok(saved)
    }

    #[instrument(skip(self, entry), fields(entry_id = ?entry.id))]
    pub async fn delete(&self, entry: &Entry) -> Result<(), ServiceError> {
        let res = match entry.id {
            Some(id) => self.repo.delete(id).await,
            None => Err(ServiceError::Precondition("entry id is required for delete")),
        };
        outcome("delete", &res);
        if res.is_ok() {
            info!("entry_deleted");
        }
        res
    }

    /// Set the status and run a full update, so the entry is re-validated.
    pub async fn update_status(&self, mut entry: Entry, status: EntryStatus) -> Result<Entry, ServiceError> {
        entry.status = Some(status);
        self.update(entry).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ServiceError> {
        self.repo.find_matching(filter).await
    }

    /// Income minus expense over every entry of the user, whatever its status.
    #[instrument(skip(self))]
    pub async fn balance(&self, user_id: Uuid) -> Result<Decimal, ServiceError> {
        let income = self.repo.sum_amount_by_type_and_user(user_id, EntryType::Income).await?;
        let expense = self.repo.sum_amount_by_type_and_user(user_id, EntryType::Expense).await?;
        Ok(income.unwrap_or(Decimal::ZERO) - expense.unwrap_or(Decimal::ZERO))
    }
}
