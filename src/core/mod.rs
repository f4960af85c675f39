// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod finder;
pub mod links;
pub mod proximity;

pub use distance::{distance_km, haversine_distance, round_to_tenth};
pub use filters::{matches_category, matches_search, parse_category_filter};
pub use finder::{CenterQuery, FinderResult, MealFinder};
pub use proximity::{filter_by_proximity, validate_radius, ProximityError};
