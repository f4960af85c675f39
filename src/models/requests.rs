use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::models::domain::CenterCategory;

/// Query string for the nearby meal center search
///
/// `lat` and `lng` must be supplied together; when both are absent the
/// origin is resolved from the caller's address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyQuery {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, rename = "radiusKm")]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default, rename = "activeOnly")]
    pub active_only: bool,
}

/// Strip surrounding whitespace so length checks see the stored value
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Like `trimmed`, mapping a blank value to `None`
fn trimmed_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}

/// Request to propose a new meal center for review
///
/// Text fields are trimmed on the way in, so a whitespace-only name,
/// address or timings fails validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitCenterRequest {
    #[validate(length(min = 1, max = 120))]
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    #[serde(rename = "type")]
    pub category: CenterCategory,
    #[validate(length(min = 1, max = 300))]
    #[serde(deserialize_with = "trimmed")]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "longitude")]
    pub lng: Option<f64>,
    #[validate(length(min = 1, max = 120))]
    #[serde(deserialize_with = "trimmed")]
    pub timings: String,
    #[validate(length(max = 40))]
    #[serde(default, deserialize_with = "trimmed_optional")]
    pub contact: Option<String>,
    #[validate(length(max = 1000))]
    #[serde(default, deserialize_with = "trimmed_optional")]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub capacity: Option<u32>,
}
