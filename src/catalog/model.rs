//! Dataset and entity types for the orchid catalog.
//!
//! `Raw*` types mirror the startup JSON document exactly, loose ids included.
//! The entity types (`CharacteristicEntry`, `OrchidRecord`) hold canonical
//! integer ids only; conversion happens once, when the taxonomy store and the
//! catalog manager are built.

use crate::catalog::error::CatalogError;
use crate::catalog::identity::{Category, CharacteristicId, OrchidId};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::error;

/// Id as written in the dataset: a JSON integer or a numeric string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    /// Canonical integer value, if the raw id has one.
    pub fn coerce(&self) -> Option<u64> {
        match self {
            RawId::Number(value) => Some(*value),
            RawId::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            RawId::Number(value) => value.to_string(),
            RawId::Text(text) => text.clone(),
        }
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        RawId::Number(value)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
/// Full startup dataset: six taxonomies plus the orchid list.
pub struct RawDataset {
    pub genus: Vec<RawCharacteristic>,
    #[serde(rename = "type")]
    pub kind: Vec<RawCharacteristic>,
    pub luminosity: Vec<RawCharacteristic>,
    pub temperature: Vec<RawCharacteristic>,
    pub humidity: Vec<RawCharacteristic>,
    pub size: Vec<RawCharacteristic>,
    pub orchid: Vec<RawOrchid>,
}

impl RawDataset {
    pub fn characteristics(&self, category: Category) -> &[RawCharacteristic] {
        match category {
            Category::Genus => &self.genus,
            Category::Type => &self.kind,
            Category::Luminosity => &self.luminosity,
            Category::Temperature => &self.temperature,
            Category::Humidity => &self.humidity,
            Category::Size => &self.size,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawCharacteristic {
    #[serde(default)]
    pub id: Option<RawId>,
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
/// Orchid as stored in the dataset; the display name lives under `description`.
pub struct RawOrchid {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(rename = "description", alias = "name", default)]
    pub name: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub genus: Option<RawId>,
    #[serde(rename = "type", default)]
    pub kind: Option<RawId>,
    #[serde(default)]
    pub luminosity: Option<RawId>,
    #[serde(default)]
    pub temperature: Option<RawId>,
    #[serde(default)]
    pub humidity: Option<RawId>,
    #[serde(default)]
    pub size: Option<RawId>,
}

impl RawOrchid {
    pub fn characteristic(&self, category: Category) -> Option<&RawId> {
        match category {
            Category::Genus => self.genus.as_ref(),
            Category::Type => self.kind.as_ref(),
            Category::Luminosity => self.luminosity.as_ref(),
            Category::Temperature => self.temperature.as_ref(),
            Category::Humidity => self.humidity.as_ref(),
            Category::Size => self.size.as_ref(),
        }
    }
}

/// Single named value within a taxonomy (e.g. genus "Cattleya").
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CharacteristicEntry {
    id: CharacteristicId,
    description: String,
}

impl CharacteristicEntry {
    pub fn new(id: CharacteristicId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    /// Build an entry from its dataset form; `position` is only used for the
    /// error message.
    pub fn from_raw(
        category: Category,
        position: usize,
        raw: &RawCharacteristic,
    ) -> Result<Self, CatalogError> {
        let raw_id = raw
            .id
            .as_ref()
            .ok_or_else(|| CatalogError::missing_characteristic_id(category, position))?;
        let id = raw_id.coerce().ok_or_else(|| CatalogError::InvalidId {
            entity: format!("{category} characteristic"),
            raw: raw_id.as_display(),
        })?;
        Ok(Self::new(CharacteristicId(id), raw.description.clone()))
    }

    pub fn id(&self) -> CharacteristicId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description. Empty values are logged and ignored, keeping
    /// the previous description; returns whether the value was applied.
    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        if description.is_empty() {
            error!(id = self.id.0, "invalid description");
            return false;
        }
        self.description = description;
        true
    }
}

/// One optional characteristic reference per category.
///
/// `None` is the absent reference: either the field was never given or the
/// given id did not resolve against its taxonomy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryRefs {
    pub genus: Option<CharacteristicId>,
    #[serde(rename = "type")]
    pub kind: Option<CharacteristicId>,
    pub luminosity: Option<CharacteristicId>,
    pub temperature: Option<CharacteristicId>,
    pub humidity: Option<CharacteristicId>,
    pub size: Option<CharacteristicId>,
}

impl CategoryRefs {
    pub fn get(&self, category: Category) -> Option<CharacteristicId> {
        match category {
            Category::Genus => self.genus,
            Category::Type => self.kind,
            Category::Luminosity => self.luminosity,
            Category::Temperature => self.temperature,
            Category::Humidity => self.humidity,
            Category::Size => self.size,
        }
    }

    pub fn set(&mut self, category: Category, value: Option<CharacteristicId>) {
        let slot = match category {
            Category::Genus => &mut self.genus,
            Category::Type => &mut self.kind,
            Category::Luminosity => &mut self.luminosity,
            Category::Temperature => &mut self.temperature,
            Category::Humidity => &mut self.humidity,
            Category::Size => &mut self.size,
        };
        *slot = value;
    }

    /// Builder form of `set` with a present id.
    pub fn with(mut self, category: Category, id: u64) -> Self {
        self.set(category, Some(CharacteristicId(id)));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<CharacteristicId>)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// An orchid that has not been given an id yet.
///
/// The catalog manager validates it, picks the id and turns it into an
/// `OrchidRecord` through `identify`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrchidCandidate {
    pub name: String,
    pub src: String,
    pub characteristics: CategoryRefs,
}

impl OrchidCandidate {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            characteristics: CategoryRefs::default(),
        }
    }

    pub fn with(mut self, category: Category, id: u64) -> Self {
        self.characteristics = self.characteristics.with(category, id);
        self
    }

    /// Consume the candidate and return the identified record.
    pub fn identify(self, id: OrchidId) -> OrchidRecord {
        OrchidRecord {
            id,
            name: self.name,
            src: self.src,
            characteristics: self.characteristics,
        }
    }
}

/// Replacement values for `CatalogManager::update`.
///
/// Name and image locator always overwrite; characteristics overwrite only
/// where present.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrchidDetails {
    pub name: String,
    pub src: String,
    pub characteristics: CategoryRefs,
}

impl OrchidDetails {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            characteristics: CategoryRefs::default(),
        }
    }

    pub fn with(mut self, category: Category, id: u64) -> Self {
        self.characteristics = self.characteristics.with(category, id);
        self
    }
}

/// Catalog item referencing one entry of each taxonomy by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OrchidRecord {
    id: OrchidId,
    name: String,
    src: String,
    #[serde(flatten)]
    characteristics: CategoryRefs,
}

impl OrchidRecord {
    pub fn id(&self) -> OrchidId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn characteristic(&self, category: Category) -> Option<CharacteristicId> {
        self.characteristics.get(category)
    }

    pub fn characteristics(&self) -> &CategoryRefs {
        &self.characteristics
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_src(&mut self, src: String) {
        self.src = src;
    }

    pub(crate) fn set_characteristic(&mut self, category: Category, id: Option<CharacteristicId>) {
        self.characteristics.set(category, id);
    }
}

/// Read and parse a dataset from disk without schema validation.
pub fn load_dataset_from_path(path: &Path) -> Result<RawDataset> {
    let data = fs::read_to_string(path)?;
    let dataset: RawDataset = serde_json::from_str(&data)?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_ids_accept_numbers_and_numeric_strings() {
        let parsed: Vec<RawId> = serde_json::from_value(json!([3, "4", " 5 ", "x"])).unwrap();
        let coerced: Vec<Option<u64>> = parsed.iter().map(RawId::coerce).collect();
        assert_eq!(coerced, vec![Some(3), Some(4), Some(5), None]);
    }

    #[test]
    fn raw_orchid_reads_name_from_description() {
        let orchid: RawOrchid = serde_json::from_value(json!({
            "id": 1,
            "description": "Phalaenopsis amabilis",
            "src": "images/phal.jpg",
            "genus": 2,
            "type": "1"
        }))
        .unwrap();
        assert_eq!(orchid.name, "Phalaenopsis amabilis");
        assert_eq!(orchid.characteristic(Category::Genus), Some(&RawId::Number(2)));
        assert_eq!(
            orchid.characteristic(Category::Type),
            Some(&RawId::Text("1".to_string()))
        );
        assert!(orchid.characteristic(Category::Size).is_none());

        let aliased: RawOrchid =
            serde_json::from_value(json!({"id": 2, "name": "Vanda coerulea"})).unwrap();
        assert_eq!(aliased.name, "Vanda coerulea");
    }

    #[test]
    fn characteristic_requires_an_id() {
        let raw = RawCharacteristic {
            id: None,
            description: "Cattleya".to_string(),
        };
        let err = CharacteristicEntry::from_raw(Category::Genus, 0, &raw).unwrap_err();
        assert!(matches!(err, CatalogError::MissingIdentity { .. }));

        let raw = RawCharacteristic {
            id: Some(RawId::Text("one".to_string())),
            description: "Cattleya".to_string(),
        };
        let err = CharacteristicEntry::from_raw(Category::Genus, 0, &raw).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId { .. }));
    }

    #[test]
    fn zero_is_a_valid_characteristic_id() {
        let raw = RawCharacteristic {
            id: Some(RawId::Number(0)),
            description: "Unknown".to_string(),
        };
        let entry = CharacteristicEntry::from_raw(Category::Size, 0, &raw).unwrap();
        assert_eq!(entry.id(), CharacteristicId(0));
    }

    #[test]
    fn empty_description_is_ignored() {
        let mut entry = CharacteristicEntry::new(CharacteristicId(1), "Cattleya");
        assert!(!entry.set_description(""));
        assert_eq!(entry.description(), "Cattleya");

        assert!(entry.set_description("Cattleya (corrected)"));
        assert_eq!(entry.description(), "Cattleya (corrected)");
    }

    #[test]
    fn category_refs_dispatch_by_category() {
        let mut refs = CategoryRefs::default()
            .with(Category::Genus, 1)
            .with(Category::Size, 4);
        assert_eq!(refs.get(Category::Genus), Some(CharacteristicId(1)));
        assert_eq!(refs.get(Category::Size), Some(CharacteristicId(4)));
        assert_eq!(refs.get(Category::Humidity), None);

        refs.set(Category::Genus, None);
        let present: Vec<Category> = refs
            .iter()
            .filter_map(|(category, id)| id.map(|_| category))
            .collect();
        assert_eq!(present, vec![Category::Size]);
    }

    #[test]
    fn identify_keeps_candidate_fields() {
        let candidate = OrchidCandidate::new("Oncidium", "images/onc.jpg").with(Category::Type, 2);
        let record = candidate.clone().identify(OrchidId(9));
        assert_eq!(record.id(), OrchidId(9));
        assert_eq!(record.name(), candidate.name);
        assert_eq!(record.src(), candidate.src);
        assert_eq!(record.characteristics(), &candidate.characteristics);
    }

    #[test]
    fn record_serializes_flat() {
        let record = OrchidCandidate::new("Vanda", "v.jpg")
            .with(Category::Genus, 3)
            .identify(OrchidId(1));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["genus"], json!(3));
        assert_eq!(value["type"], json!(null));
    }
}
