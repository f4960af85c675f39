use crate::core::{
    filters::{matches_category, matches_search},
    proximity::{filter_by_proximity, validate_radius, ProximityError},
};
use crate::models::{CenterCategory, Coordinate, MealCenter, Nearby};

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 30.0;

/// Parameters for a single nearby search
#[derive(Debug, Clone, Default)]
pub struct CenterQuery {
    pub search: Option<String>,
    pub category: Option<CenterCategory>,
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
    /// Hide centers that are not currently serving. Off by default, so
    /// inactive centers are returned and flagged through `isActive`.
    pub active_only: bool,
}

/// Result of a nearby search
#[derive(Debug)]
pub struct FinderResult {
    pub centers: Vec<Nearby<MealCenter>>,
    pub radius_km: f64,
    pub total_candidates: usize,
}

/// Nearby meal center search - runs the lookup pipeline over the catalog
///
/// # Pipeline Stages
/// 1. Category filter
/// 2. Free-text search
/// 3. Active centers only, when requested
/// 4. Proximity filter and distance ranking
/// 5. Result limit
#[derive(Debug, Clone)]
pub struct MealFinder {
    default_radius_km: f64,
    max_results: usize,
}

impl MealFinder {
    pub fn new(default_radius_km: f64, max_results: usize) -> Result<Self, ProximityError> {
        validate_radius(default_radius_km)?;
        Ok(Self {
            default_radius_km,
            max_results: max_results.max(1),
        })
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Find centers around `origin` matching `query`
    ///
    /// # Arguments
    /// * `origin` - The search origin
    /// * `centers` - The catalog to search
    /// * `query` - Search term, category, radius and limit
    ///
    /// # Returns
    /// FinderResult with centers ordered by ascending distance
    pub fn find_nearby(
        &self,
        origin: Coordinate,
        centers: &[MealCenter],
        query: &CenterQuery,
    ) -> Result<FinderResult, ProximityError> {
        let radius_km = query.radius_km.unwrap_or(self.default_radius_km);
        let limit = query
            .limit
            .unwrap_or(self.max_results)
            .clamp(1, self.max_results);
        let search = query.search.as_deref().unwrap_or("");

        let candidates: Vec<MealCenter> = centers
            .iter()
            // Stage 1: category
            .filter(|center| matches_category(center, query.category))
            // Stage 2: free-text search
            .filter(|center| matches_search(center, search))
            // Stage 3: opt-in active filter
            .filter(|center| !query.active_only || center.is_active)
            .cloned()
            .collect();

        let total_candidates = candidates.len();

        // Stage 4: distance annotation, radius cut and ordering
        let mut nearby = filter_by_proximity(origin, candidates, radius_km)?;

        // Stage 5: limit
        nearby.truncate(limit);

        tracing::debug!(
            "Nearby search: {} of {} candidates within {} km",
            nearby.len(),
            total_candidates,
            radius_km
        );

        Ok(FinderResult {
            centers: nearby,
            radius_km,
            total_candidates,
        })
    }
}

impl Default for MealFinder {
    fn default() -> Self {
        Self {
            default_radius_km: DEFAULT_RADIUS_KM,
            max_results: 100,
        }
    }
}
