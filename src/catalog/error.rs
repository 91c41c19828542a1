//! Typed failures raised by the catalog core.
//!
//! Every variant renders as a sentence that can be shown to a user as-is.
//! Invalid description assignments and removals of unknown ids are not
//! errors: they are logged and ignored.

use crate::catalog::identity::{Category, CharacteristicId, OrchidId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// An entity was constructed from raw data that carried no id.
    #[error("ID is required for {entity} ({context}).")]
    MissingIdentity {
        entity: &'static str,
        context: String,
    },

    #[error("An orchid with this name already exists: {name}.")]
    DuplicateName { name: String },

    #[error("Orchid with ID {id} not found.")]
    NotFound { id: OrchidId },

    #[error("No orchid ID is left after {last}; cannot add another orchid.")]
    IdExhausted { last: OrchidId },

    #[error("{entity} ID {id} appears more than once in the dataset.")]
    DuplicateId { entity: String, id: u64 },

    #[error("{entity} ID '{raw}' is not a non-negative integer.")]
    InvalidId { entity: String, raw: String },

    #[error(
        "Unknown category '{0}' (expected one of genus, type, luminosity, temperature, humidity, size)."
    )]
    UnknownCategory(String),

    #[error("Invalid value '{value}' for field '{field}'.")]
    InvalidField { field: String, value: String },
}

impl CatalogError {
    pub(crate) fn missing_characteristic_id(category: Category, position: usize) -> Self {
        CatalogError::MissingIdentity {
            entity: "a characteristic",
            context: format!("{} entry #{}", category, position + 1),
        }
    }

    pub(crate) fn missing_orchid_id(position: usize) -> Self {
        CatalogError::MissingIdentity {
            entity: "an orchid",
            context: format!("orchid entry #{}", position + 1),
        }
    }

    pub(crate) fn duplicate_characteristic(category: Category, id: CharacteristicId) -> Self {
        CatalogError::DuplicateId {
            entity: format!("{category} characteristic"),
            id: id.0,
        }
    }
}
