use serde::{Deserialize, Serialize};

use crate::models::domain::{CenterCategory, Coordinate, MealCenter, PendingCenter, PositionSource};

/// A center in a nearby search result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCenter {
    #[serde(flatten)]
    pub center: MealCenter,
    pub distance_km: f64,
    pub directions_url: String,
}

/// Response for the nearby search endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResponse {
    pub origin: Coordinate,
    pub origin_source: PositionSource,
    pub radius_km: f64,
    pub centers: Vec<NearbyCenter>,
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Share targets for a single center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub whatsapp: String,
    pub twitter: String,
    pub facebook: String,
}

/// Response for the center detail endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterDetailResponse {
    #[serde(flatten)]
    pub center: MealCenter,
    pub directions_url: String,
    pub share_links: ShareLinks,
}

/// Response for the categories endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CenterCategory>,
}

/// Response for the location endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub position: Coordinate,
    pub source: PositionSource,
}

/// Response for a meal center submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCenterResponse {
    pub success: bool,
    pub message: String,
    pub submission: PendingCenter,
}

/// Response listing pending submissions
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionsResponse {
    pub submissions: Vec<PendingCenter>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
