use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{Entry, EntryStatus, EntryType};

/// Query by example over entries. Unset fields are unconstrained, the
/// description matches as a case-insensitive substring and every other field
/// by equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<Uuid>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

fn eq_if_set<T: PartialEq>(wanted: &Option<T>, actual: &Option<T>) -> bool {
    wanted.as_ref().map_or(true, |w| actual.as_ref() == Some(w))
}

impl EntryFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        let description_ok = match &self.description {
            None => true,
            Some(needle) => entry
                .description
                .as_deref()
                .map_or(false, |d| d.to_lowercase().contains(&needle.to_lowercase())),
        };
        description_ok
            && eq_if_set(&self.month, &entry.month)
            && eq_if_set(&self.year, &entry.year)
            && eq_if_set(&self.user_id, &entry.user_id)
            && eq_if_set(&self.entry_type, &entry.entry_type)
            && eq_if_set(&self.status, &entry.status)
    }

    /// The equality part of the filter, in row terms.
    pub fn equality(&self) -> models::entry::EqualityFilter {
        models::entry::EqualityFilter {
            user_id: self.user_id,
            month: self.month,
            year: self.year,
            entry_type: self.entry_type.map(|t| t.as_str().to_string()),
            status: self.status.map(|s| s.as_str().to_string()),
        }
    }
}

/// Use a partially filled entry as the example.
impl From<&Entry> for EntryFilter {
    fn from(e: &Entry) -> Self {
        EntryFilter {
            description: e.description.clone(),
            month: e.month,
            year: e.year,
            user_id: e.user_id,
            entry_type: e.entry_type,
            status: e.status,
        }
    }
}
