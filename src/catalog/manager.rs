//! Catalog manager: owner of the orchid collection.
//!
//! All mutation goes through here. The manager enforces name uniqueness on
//! create, assigns ids, resolves characteristic references against the
//! taxonomy store and answers category queries. The taxonomy store is read,
//! never written, once the manager exists.

use crate::catalog::error::CatalogError;
use crate::catalog::identity::{Category, CharacteristicId, OrchidId};
use crate::catalog::index::TaxonomyStore;
use crate::catalog::model::{
    CategoryRefs, CharacteristicEntry, OrchidCandidate, OrchidDetails, OrchidRecord, RawDataset,
    RawId, RawOrchid,
};
use crate::catalog::repository::OrchidRepository;
use crate::gallery::OrchidView;
use crate::schema_loader::validate_dataset_file;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Clone, Debug)]
pub struct CatalogManager {
    taxonomy: TaxonomyStore,
    orchids: OrchidRepository,
}

impl CatalogManager {
    /// Build the taxonomies and then every orchid from a parsed dataset.
    ///
    /// Characteristic ids that do not resolve are stored as absent
    /// references; only identity problems abort the load.
    pub fn new(raw: &RawDataset) -> Result<Self, CatalogError> {
        let taxonomy = TaxonomyStore::load(raw)?;
        Self::from_parts(taxonomy, &raw.orchid)
    }

    /// Build a manager over an existing taxonomy store.
    ///
    /// Lets callers correct taxonomy descriptions before the store becomes
    /// read-only.
    pub fn from_parts(
        taxonomy: TaxonomyStore,
        raw_orchids: &[RawOrchid],
    ) -> Result<Self, CatalogError> {
        let mut orchids = OrchidRepository::default();
        for (position, raw) in raw_orchids.iter().enumerate() {
            let record = build_record(&taxonomy, position, raw)?;
            if orchids.get(record.id()).is_some() {
                return Err(CatalogError::DuplicateId {
                    entity: "Orchid".to_string(),
                    id: record.id().0,
                });
            }
            orchids.push(record);
        }
        info!(
            orchids = orchids.len(),
            characteristics = taxonomy.len(),
            "catalog loaded"
        );
        Ok(Self { taxonomy, orchids })
    }

    /// Validate, parse and load a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let value = validate_dataset_file(path)?;
        let raw: RawDataset = serde_json::from_value(value)
            .with_context(|| format!("parsing dataset {}", path.display()))?;
        Self::new(&raw).with_context(|| format!("loading catalog from {}", path.display()))
    }

    /// Every orchid in insertion order.
    pub fn orchids(&self) -> &[OrchidRecord] {
        self.orchids.as_slice()
    }

    pub fn orchid(&self, id: OrchidId) -> Option<&OrchidRecord> {
        self.orchids.get(id)
    }

    pub fn taxonomy(&self) -> &TaxonomyStore {
        &self.taxonomy
    }

    pub fn entries_of(&self, category: Category) -> &[CharacteristicEntry] {
        self.taxonomy.entries_of(category)
    }

    /// The entry a record references for `category`, if any.
    pub fn characteristic(
        &self,
        record: &OrchidRecord,
        category: Category,
    ) -> Option<&CharacteristicEntry> {
        let id = record.characteristic(category)?;
        self.taxonomy.resolve(category, id)
    }

    /// Detail view of a record with its characteristics resolved.
    pub fn view<'a>(&'a self, record: &'a OrchidRecord) -> OrchidView<'a> {
        OrchidView::resolve(self, record)
    }

    /// Add a new orchid at the tail of the collection.
    ///
    /// Fails with `DuplicateName` when the name is already taken (ignoring
    /// case) and leaves the collection untouched. The id is one past the
    /// current maximum; `IdExhausted` when that would overflow.
    pub fn create(&mut self, candidate: OrchidCandidate) -> Result<&OrchidRecord, CatalogError> {
        if self.orchids.contains_name(&candidate.name) {
            warn!(name = %candidate.name, "duplicate orchid name rejected");
            return Err(CatalogError::DuplicateName {
                name: candidate.name,
            });
        }

        let id = self.orchids.next_id()?;
        debug!(id = id.0, "generated orchid id");

        let mut candidate = candidate;
        candidate.characteristics = resolve_refs(&self.taxonomy, &candidate.characteristics);
        let record = self.orchids.push(candidate.identify(id));
        info!(id = id.0, name = %record.name(), "orchid created");
        Ok(record)
    }

    /// Overwrite an existing orchid.
    ///
    /// Name and image locator are always replaced and the name is not
    /// re-checked for uniqueness. Characteristics are replaced only where
    /// `details` carries a non-zero id; id 0 counts as not given. A value that
    /// does not resolve clears the reference.
    pub fn update(
        &mut self,
        id: OrchidId,
        details: OrchidDetails,
    ) -> Result<&OrchidRecord, CatalogError> {
        let taxonomy = &self.taxonomy;
        let record = self
            .orchids
            .get_mut(id)
            .ok_or(CatalogError::NotFound { id })?;

        record.set_name(details.name);
        record.set_src(details.src);
        for (category, value) in details.characteristics.iter() {
            if let Some(characteristic_id) = value.filter(|id| id.0 != 0) {
                let resolved = resolve_ref(taxonomy, category, characteristic_id);
                record.set_characteristic(category, resolved);
            }
        }
        info!(id = id.0, "orchid updated");
        Ok(&*record)
    }

    /// Remove an orchid, returning it.
    ///
    /// Unknown ids are a logged no-op, not an error.
    pub fn remove(&mut self, id: OrchidId) -> Option<OrchidRecord> {
        match self.orchids.remove(id) {
            Some(record) => {
                info!(id = id.0, remaining = self.orchids.len(), "orchid removed");
                Some(record)
            }
            None => {
                warn!(id = id.0, "orchid not found; nothing removed");
                None
            }
        }
    }

    /// Orchids whose `category` reference is `characteristic_id`, in
    /// collection order. Records without a reference never match.
    pub fn filter_by_category(
        &self,
        category: Category,
        characteristic_id: CharacteristicId,
    ) -> Vec<&OrchidRecord> {
        self.orchids
            .iter()
            .filter(|record| record.characteristic(category) == Some(characteristic_id))
            .collect()
    }
}

fn build_record(
    taxonomy: &TaxonomyStore,
    position: usize,
    raw: &RawOrchid,
) -> Result<OrchidRecord, CatalogError> {
    let raw_id = raw
        .id
        .as_ref()
        .ok_or_else(|| CatalogError::missing_orchid_id(position))?;
    let id = raw_id.coerce().ok_or_else(|| CatalogError::InvalidId {
        entity: "Orchid".to_string(),
        raw: raw_id.as_display(),
    })?;

    let mut characteristics = CategoryRefs::default();
    for category in Category::ALL {
        let resolved = raw
            .characteristic(category)
            .and_then(|value| resolve_raw(taxonomy, category, value, id));
        characteristics.set(category, resolved);
    }

    let candidate = OrchidCandidate {
        name: raw.name.clone(),
        src: raw.src.clone(),
        characteristics,
    };
    Ok(candidate.identify(OrchidId(id)))
}

fn resolve_raw(
    taxonomy: &TaxonomyStore,
    category: Category,
    raw: &RawId,
    orchid: u64,
) -> Option<CharacteristicId> {
    let Some(value) = raw.coerce() else {
        warn!(
            orchid,
            %category,
            raw = %raw.as_display(),
            "characteristic id is not numeric; leaving reference empty"
        );
        return None;
    };
    resolve_ref(taxonomy, category, CharacteristicId(value))
}

fn resolve_ref(
    taxonomy: &TaxonomyStore,
    category: Category,
    id: CharacteristicId,
) -> Option<CharacteristicId> {
    if taxonomy.contains(category, id) {
        Some(id)
    } else {
        warn!(%category, id = id.0, "unknown characteristic; leaving reference empty");
        None
    }
}

fn resolve_refs(taxonomy: &TaxonomyStore, refs: &CategoryRefs) -> CategoryRefs {
    let mut resolved = CategoryRefs::default();
    for (category, value) in refs.iter() {
        resolved.set(
            category,
            value.and_then(|id| resolve_ref(taxonomy, category, id)),
        );
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::RawCharacteristic;

    fn characteristic(id: u64, description: &str) -> RawCharacteristic {
        RawCharacteristic {
            id: Some(RawId::Number(id)),
            description: description.to_string(),
        }
    }

    fn orchid(id: u64, name: &str, genus: u64) -> RawOrchid {
        RawOrchid {
            id: Some(RawId::Number(id)),
            name: name.to_string(),
            src: format!("images/{id}.jpg"),
            genus: Some(RawId::Number(genus)),
            kind: Some(RawId::Number(1)),
            luminosity: Some(RawId::Number(1)),
            temperature: Some(RawId::Number(1)),
            humidity: Some(RawId::Number(1)),
            size: Some(RawId::Number(1)),
        }
    }

    fn dataset() -> RawDataset {
        RawDataset {
            genus: vec![characteristic(1, "Cattleya"), characteristic(2, "Vanda")],
            kind: vec![characteristic(1, "Epiphyte"), characteristic(2, "Terrestrial")],
            luminosity: vec![characteristic(1, "Bright")],
            temperature: vec![characteristic(1, "Intermediate")],
            humidity: vec![characteristic(1, "Medium")],
            size: vec![characteristic(1, "Medium")],
            orchid: vec![orchid(1, "A", 1)],
        }
    }

    fn candidate(name: &str) -> OrchidCandidate {
        let mut candidate = OrchidCandidate::new(name, "images/new.jpg");
        for category in Category::ALL {
            candidate = candidate.with(category, 1);
        }
        candidate
    }

    #[test]
    fn create_appends_with_next_id() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let created = manager.create(candidate("B")).unwrap();
        assert_eq!(created.id(), OrchidId(2));

        assert_eq!(manager.orchids().len(), 2);
        assert_eq!(manager.orchids()[1].name(), "B");
        let genus_one = manager.filter_by_category(Category::Genus, CharacteristicId(1));
        assert_eq!(genus_one.len(), 2);
    }

    #[test]
    fn create_rejects_case_insensitive_duplicates() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let before = manager.orchids().to_vec();
        let err = manager.create(candidate("a")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateName {
                name: "a".to_string()
            }
        );
        assert_eq!(manager.orchids(), before.as_slice());
    }

    #[test]
    fn create_clears_unresolvable_references() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let created = manager
            .create(OrchidCandidate::new("C", "c.jpg").with(Category::Genus, 99))
            .unwrap();
        assert_eq!(created.characteristic(Category::Genus), None);
    }

    #[test]
    fn update_replaces_only_present_characteristics() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let updated = manager
            .update(
                OrchidId(1),
                OrchidDetails::new("A2", "a2.jpg").with(Category::Genus, 2),
            )
            .unwrap();
        assert_eq!(updated.name(), "A2");
        assert_eq!(updated.src(), "a2.jpg");
        assert_eq!(updated.characteristic(Category::Genus), Some(CharacteristicId(2)));
        assert_eq!(updated.characteristic(Category::Type), Some(CharacteristicId(1)));
    }

    #[test]
    fn create_fails_when_ids_run_out() {
        let mut raw = dataset();
        raw.orchid[0].id = Some(RawId::Number(u64::MAX));
        let mut manager = CatalogManager::new(&raw).unwrap();
        let err = manager.create(candidate("B")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::IdExhausted {
                last: OrchidId(u64::MAX)
            }
        );
        assert_eq!(manager.orchids().len(), 1);
    }

    #[test]
    fn update_treats_zero_as_not_given() {
        let mut raw = dataset();
        raw.genus.push(characteristic(0, "Oncidium"));
        let mut manager = CatalogManager::new(&raw).unwrap();
        let updated = manager
            .update(
                OrchidId(1),
                OrchidDetails::new("A", "a.jpg").with(Category::Genus, 0),
            )
            .unwrap();
        assert_eq!(updated.characteristic(Category::Genus), Some(CharacteristicId(1)));
    }

    #[test]
    fn update_with_unknown_characteristic_clears_it() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let updated = manager
            .update(
                OrchidId(1),
                OrchidDetails::new("A", "a.jpg").with(Category::Size, 42),
            )
            .unwrap();
        assert_eq!(updated.characteristic(Category::Size), None);
    }

    #[test]
    fn update_missing_id_fails() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        let err = manager
            .update(OrchidId(7), OrchidDetails::new("X", "x.jpg"))
            .unwrap_err();
        assert_eq!(err, CatalogError::NotFound { id: OrchidId(7) });
        assert_eq!(manager.orchids()[0].name(), "A");
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut manager = CatalogManager::new(&dataset()).unwrap();
        assert!(manager.remove(OrchidId(5)).is_none());
        assert_eq!(manager.orchids().len(), 1);
        assert!(manager.remove(OrchidId(1)).is_some());
        assert!(manager.orchids().is_empty());
    }

    #[test]
    fn load_keeps_unresolved_references_absent() {
        let mut raw = dataset();
        raw.orchid.push(RawOrchid {
            humidity: Some(RawId::Text("wet".to_string())),
            ..orchid(2, "Dangling", 9)
        });
        let manager = CatalogManager::new(&raw).unwrap();
        let record = manager.orchid(OrchidId(2)).unwrap();
        assert_eq!(record.characteristic(Category::Genus), None);
        assert_eq!(record.characteristic(Category::Humidity), None);
        assert_eq!(record.characteristic(Category::Size), Some(CharacteristicId(1)));
        assert!(manager.characteristic(record, Category::Genus).is_none());
        assert!(
            manager
                .filter_by_category(Category::Genus, CharacteristicId(9))
                .is_empty()
        );
    }

    #[test]
    fn load_rejects_orchid_identity_problems() {
        let mut raw = dataset();
        raw.orchid.push(RawOrchid {
            id: None,
            ..orchid(0, "Nameless", 1)
        });
        let err = CatalogManager::new(&raw).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MissingIdentity {
                entity: "an orchid",
                context: "orchid entry #2".to_string()
            }
        );

        let mut raw = dataset();
        raw.orchid.push(orchid(1, "Twin", 1));
        let err = CatalogManager::new(&raw).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { id: 1, .. }));
    }

    #[test]
    fn from_parts_uses_corrected_taxonomy() {
        let raw = dataset();
        let mut taxonomy = TaxonomyStore::load(&raw).unwrap();
        taxonomy.correct_description(Category::Genus, CharacteristicId(1), "Cattleya Lindl.");
        let manager = CatalogManager::from_parts(taxonomy, &raw.orchid).unwrap();
        let record = &manager.orchids()[0];
        let genus = manager.characteristic(record, Category::Genus).unwrap();
        assert_eq!(genus.description(), "Cattleya Lindl.");
    }
}
