use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Case-insensitive; `RECEITA` and `DESPESA` are accepted as aliases.
impl FromStr for EntryType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" | "RECEITA" => Ok(EntryType::Income),
            "EXPENSE" | "DESPESA" => Ok(EntryType::Expense),
            _ => Err(ServiceError::business(format!("Tipo de lançamento inválido: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Pending,
    Settled,
    Canceled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Settled => "SETTLED",
            EntryStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Case-insensitive; `PENDENTE`, `EFETIVADO` and `CANCELADO` are accepted as aliases.
impl FromStr for EntryStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" | "PENDENTE" => Ok(EntryStatus::Pending),
            "SETTLED" | "EFETIVADO" => Ok(EntryStatus::Settled),
            "CANCELED" | "CANCELADO" => Ok(EntryStatus::Canceled),
            _ => Err(ServiceError::business(format!("Status de lançamento inválido: {}", s))),
        }
    }
}

/// An income or expense record as the service sees it.
///
/// Every field is optional so that partially filled candidates can be
/// validated and reported on; a stored entry has all of them set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<Uuid>,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
    pub registered_on: Option<NaiveDate>,
}

impl TryFrom<models::entry::Model> for Entry {
    type Error = ServiceError;

    fn try_from(m: models::entry::Model) -> Result<Self, Self::Error> {
        let entry_type = m
            .entry_type
            .parse::<EntryType>()
            .map_err(|_| ServiceError::Db(format!("unknown entry_type '{}' stored for entry {}", m.entry_type, m.id)))?;
        let status = m
            .status
            .parse::<EntryStatus>()
            .map_err(|_| ServiceError::Db(format!("unknown status '{}' stored for entry {}", m.status, m.id)))?;
        Ok(Entry {
            id: Some(m.id),
            description: Some(m.description),
            month: Some(m.month),
            year: Some(m.year),
            user_id: Some(m.user_id),
            amount: Some(m.amount),
            entry_type: Some(entry_type),
            status: Some(status),
            registered_on: Some(m.registered_on),
        })
    }
}

impl Entry {
    /// Row form of the entry, assigning a fresh id when it has none.
    pub fn into_model(self) -> Result<models::entry::Model, ServiceError> {
        const INCOMPLETE: &str = "entry must be validated before it is stored";
        Ok(models::entry::Model {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id: self.user_id.ok_or(ServiceError::Precondition(INCOMPLETE))?,
            description: self.description.ok_or(ServiceError::Precondition(INCOMPLETE))?,
            month: self.month.ok_or(ServiceError::Precondition(INCOMPLETE))?,
            year: self.year.ok_or(ServiceError::Precondition(INCOMPLETE))?,
            amount: self.amount.ok_or(ServiceError::Precondition(INCOMPLETE))?,
            entry_type: self.entry_type.ok_or(ServiceError::Precondition(INCOMPLETE))?.as_str().to_string(),
            status: self.status.unwrap_or(EntryStatus::Pending).as_str().to_string(),
            registered_on: self.registered_on.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        })
    }
}
