//! The six characteristic taxonomies, indexed for id resolution.
//!
//! Entries keep dataset order because that is the order the category browser
//! lists them in. The store is strict while loading (missing, malformed or
//! repeated ids are rejected) and read-only once handed to the catalog
//! manager.

use crate::catalog::error::CatalogError;
use crate::catalog::identity::{Category, CharacteristicId};
use crate::catalog::model::{CharacteristicEntry, RawDataset};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Clone, Debug, Default)]
pub struct TaxonomyStore {
    genus: Vec<CharacteristicEntry>,
    kind: Vec<CharacteristicEntry>,
    luminosity: Vec<CharacteristicEntry>,
    temperature: Vec<CharacteristicEntry>,
    humidity: Vec<CharacteristicEntry>,
    size: Vec<CharacteristicEntry>,
}

impl TaxonomyStore {
    /// Build every taxonomy from the dataset, preserving input order.
    pub fn load(raw: &RawDataset) -> Result<Self, CatalogError> {
        let mut store = Self::default();
        for category in Category::ALL {
            *store.entries_mut(category) = build_taxonomy(category, raw)?;
        }
        Ok(store)
    }

    /// Ordered entries of one taxonomy.
    pub fn entries_of(&self, category: Category) -> &[CharacteristicEntry] {
        match category {
            Category::Genus => &self.genus,
            Category::Type => &self.kind,
            Category::Luminosity => &self.luminosity,
            Category::Temperature => &self.temperature,
            Category::Humidity => &self.humidity,
            Category::Size => &self.size,
        }
    }

    /// Find the entry with `id` in one taxonomy.
    ///
    /// Returns `None` instead of erroring; the caller decides whether an
    /// unresolved id is worth a diagnostic.
    pub fn resolve(
        &self,
        category: Category,
        id: CharacteristicId,
    ) -> Option<&CharacteristicEntry> {
        self.entries_of(category).iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, category: Category, id: CharacteristicId) -> bool {
        self.resolve(category, id).is_some()
    }

    /// Total number of entries across all six taxonomies.
    pub fn len(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.entries_of(*category).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Correct the description of one entry before the store is shared.
    ///
    /// Unknown ids and empty descriptions are logged and ignored; returns
    /// whether the description changed.
    pub fn correct_description(
        &mut self,
        category: Category,
        id: CharacteristicId,
        description: impl Into<String>,
    ) -> bool {
        match self
            .entries_mut(category)
            .iter_mut()
            .find(|entry| entry.id() == id)
        {
            Some(entry) => entry.set_description(description),
            None => {
                warn!(%category, id = id.0, "no characteristic to correct");
                false
            }
        }
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<CharacteristicEntry> {
        match category {
            Category::Genus => &mut self.genus,
            Category::Type => &mut self.kind,
            Category::Luminosity => &mut self.luminosity,
            Category::Temperature => &mut self.temperature,
            Category::Humidity => &mut self.humidity,
            Category::Size => &mut self.size,
        }
    }
}

fn build_taxonomy(
    category: Category,
    raw: &RawDataset,
) -> Result<Vec<CharacteristicEntry>, CatalogError> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();
    for (position, item) in raw.characteristics(category).iter().enumerate() {
        let entry = CharacteristicEntry::from_raw(category, position, item)?;
        if !seen.insert(entry.id()) {
            return Err(CatalogError::duplicate_characteristic(category, entry.id()));
        }
        entries.push(entry);
    }
    Ok(entries)
}
