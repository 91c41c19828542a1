//! Identifiers and the closed set of characteristic categories.
//!
//! Ids are plain integers once loaded; raw dataset ids are coerced before
//! they reach these types. Category names parse and serialize in their
//! lowercase dataset form, and anything else is rejected.

use crate::catalog::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of an orchid record.
///
/// Assigned by the catalog manager on create; never changed afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrchidId(pub u64);

/// Identifier of a characteristic entry, unique within its own taxonomy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacteristicId(pub u64);

impl fmt::Display for OrchidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CharacteristicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the six characteristic dimensions an orchid is classified by.
///
/// The set is closed: names outside it are rejected at parse time, so
/// lookups keyed by `Category` cannot miss.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Genus,
    Type,
    Luminosity,
    Temperature,
    Humidity,
    Size,
}

impl Category {
    /// Every category in dataset (and navigation) order.
    pub const ALL: [Category; 6] = [
        Category::Genus,
        Category::Type,
        Category::Luminosity,
        Category::Temperature,
        Category::Humidity,
        Category::Size,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Genus => "genus",
            Category::Type => "type",
            Category::Luminosity => "luminosity",
            Category::Temperature => "temperature",
            Category::Humidity => "humidity",
            Category::Size => "size",
        }
    }

    /// Capitalized label used for headings ("Genus", "Luminosity").
    pub fn title(&self) -> &'static str {
        match self {
            Category::Genus => "Genus",
            Category::Type => "Type",
            Category::Luminosity => "Luminosity",
            Category::Temperature => "Temperature",
            Category::Humidity => "Humidity",
            Category::Size => "Size",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "genus" => Ok(Category::Genus),
            "type" => Ok(Category::Type),
            "luminosity" => Ok(Category::Luminosity),
            "temperature" => Ok(Category::Temperature),
            "humidity" => Ok(Category::Humidity),
            "size" => Ok(Category::Size),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
