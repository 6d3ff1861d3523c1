//! Shared query parameter types for API handlers.

use clinique_core::types::DbId;
use serde::{Deserialize, Deserializer};

/// `?patient_id=` filter accepted by the diagnostic and vital-sign listings.
///
/// Absent or empty means "all patients".
#[derive(Debug, Default, Deserialize)]
pub struct PatientFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub patient_id: Option<DbId>,
}

/// Parse an optional id, treating `?key=` like an absent key.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
