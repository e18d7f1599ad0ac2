//! Catalog records returned by the listing endpoint.

use serde::Deserialize;
use serde_json::{Number, Value};

/// One scored artifact as exposed by the registry.
///
/// Entries are decoded fresh on every fetch and never cached. The rating is
/// shown in serde_json's canonical number form: integers as sent, floats via
/// their shortest round-trip spelling (`1e2` becomes `100.0`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    /// Artifact name.
    pub name: String,
    /// Artifact category, such as `model` or `dataset`.
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// Average rating, integer or float as sent by the registry.
    pub avg_rating: Number,
}

impl CatalogEntry {
    /// Build an entry in code, mostly for fixtures.
    ///
    /// Non-finite ratings have no JSON form and are stored as `0`.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        avg_rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            avg_rating: Number::from_f64(avg_rating).unwrap_or_else(|| Number::from(0)),
        }
    }
}

/// Decode a listing payload, preserving server order.
///
/// # Errors
///
/// Returns the serde error when the payload is not an array of entries or any
/// entry is missing a field or carries the wrong type.
pub fn decode_catalog(payload: Value) -> Result<Vec<CatalogEntry>, serde_json::Error> {
    serde_json::from_value(payload)
}
