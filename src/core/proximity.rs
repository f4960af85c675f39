use thiserror::Error;

use crate::core::distance::distance_km;
use crate::models::{Coordinate, Located, Nearby};

/// Validation failures for a proximity search
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProximityError {
    #[error("Latitude must be a number between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    #[error("Longitude must be a number between -180 and 180, got {0}")]
    InvalidLongitude(f64),

    #[error("Radius must be a positive number of kilometers, got {0}")]
    InvalidRadius(f64),
}

/// Check that a search radius is usable
pub fn validate_radius(radius_km: f64) -> Result<(), ProximityError> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(ProximityError::InvalidRadius(radius_km))
    }
}

/// Rank candidates by distance from `origin`, keeping those within `radius_km`
///
/// Every candidate is annotated with its rounded distance. Candidates whose
/// distance exceeds the radius are dropped; the boundary is inclusive. The
/// result is ordered by ascending distance and ties keep their input order.
///
/// Fails only when the origin, a candidate position or the radius is invalid.
pub fn filter_by_proximity<T, I>(
    origin: Coordinate,
    candidates: I,
    radius_km: f64,
) -> Result<Vec<Nearby<T>>, ProximityError>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    origin.validate()?;
    validate_radius(radius_km)?;

    let mut nearby = Vec::new();
    for record in candidates {
        let position = record.coordinate();
        position.validate()?;

        let distance_km = distance_km(origin, position);
        if distance_km <= radius_km {
            nearby.push(Nearby { record, distance_km });
        }
    }

    // sort_by is stable, which keeps input order for equal distances
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    Ok(nearby)
}
