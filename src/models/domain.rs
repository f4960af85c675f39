use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::ProximityError;

/// A WGS-84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting NaN, infinite and out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProximityError> {
        let coordinate = Self { latitude, longitude };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check that both components are finite and inside their ranges
    pub fn validate(&self) -> Result<(), ProximityError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ProximityError::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ProximityError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        // geo points are (x = longitude, y = latitude)
        geo::Point::new(value.longitude, value.latitude)
    }
}

/// Anything with a fixed position that the proximity filter can rank
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// Kind of organisation running a meal center
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CenterCategory {
    Gurudwara,
    #[serde(rename = "ISKCON Temple")]
    IskconTemple,
    #[serde(rename = "Hindu Temple")]
    HinduTemple,
    Mosque,
    Church,
    #[serde(rename = "Community Kitchen")]
    CommunityKitchen,
    #[serde(rename = "NGO")]
    Ngo,
    #[serde(rename = "Government Center")]
    GovernmentCenter,
}

impl CenterCategory {
    pub const ALL: [CenterCategory; 8] = [
        CenterCategory::Gurudwara,
        CenterCategory::IskconTemple,
        CenterCategory::HinduTemple,
        CenterCategory::Mosque,
        CenterCategory::Church,
        CenterCategory::CommunityKitchen,
        CenterCategory::Ngo,
        CenterCategory::GovernmentCenter,
    ];

    /// Human-readable label, identical to the wire name
    pub fn label(&self) -> &'static str {
        match self {
            CenterCategory::Gurudwara => "Gurudwara",
            CenterCategory::IskconTemple => "ISKCON Temple",
            CenterCategory::HinduTemple => "Hindu Temple",
            CenterCategory::Mosque => "Mosque",
            CenterCategory::Church => "Church",
            CenterCategory::CommunityKitchen => "Community Kitchen",
            CenterCategory::Ngo => "NGO",
            CenterCategory::GovernmentCenter => "Government Center",
        }
    }
}

impl fmt::Display for CenterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a category label is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown meal center type: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CenterCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CenterCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A free meal center from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCenter {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub category: CenterCategory,
    pub address: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
    pub timings: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Located for MealCenter {
    fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub(crate) fn default_capacity() -> u32 { 100 }

fn default_true() -> bool { true }

/// A record paired with its distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nearby<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Where the origin of a search came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSource {
    /// Supplied explicitly by the caller
    Client,
    /// Looked up by the geolocation service
    Geolocated,
    /// Configured default used because no position could be obtained
    Fallback,
}

/// A search origin together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPosition {
    pub coordinate: Coordinate,
    pub source: PositionSource,
}

/// A visitor-submitted center waiting for review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCenter {
    pub submission_id: uuid::Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category: CenterCategory,
    pub address: String,
    pub coordinate: Coordinate,
    pub position_source: PositionSource,
    pub timings: String,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub capacity: u32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
