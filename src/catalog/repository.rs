//! Ordered in-memory store of orchid records.
//!
//! Records stay in insertion order, which is also display order; id order is
//! irrelevant here. The repository knows nothing about taxonomies; reference
//! resolution and the create/update policy live in the catalog manager.

use crate::catalog::error::CatalogError;
use crate::catalog::identity::OrchidId;
use crate::catalog::model::OrchidRecord;

#[derive(Clone, Debug, Default)]
pub struct OrchidRepository {
    records: Vec<OrchidRecord>,
}

impl OrchidRepository {
    /// Append a record at the tail.
    pub fn push(&mut self, record: OrchidRecord) -> &OrchidRecord {
        self.records.push(record);
        let last = self.records.len() - 1;
        &self.records[last]
    }

    pub fn get(&self, id: OrchidId) -> Option<&OrchidRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: OrchidId) -> Option<&mut OrchidRecord> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Remove the record with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: OrchidId) -> Option<OrchidRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Whether a record already uses `name`, compared case-insensitively.
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .any(|record| record.name().to_lowercase() == wanted)
    }

    /// Next id: one past the highest id currently stored, 1 when empty.
    ///
    /// Ids freed by removing the highest record are handed out again. Fails
    /// with `IdExhausted` once the highest id is `u64::MAX`.
    pub fn next_id(&self) -> Result<OrchidId, CatalogError> {
        let max = self
            .records
            .iter()
            .map(|record| record.id().0)
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .map(OrchidId)
            .ok_or(CatalogError::IdExhausted { last: OrchidId(max) })
    }

    pub fn as_slice(&self) -> &[OrchidRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrchidRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
