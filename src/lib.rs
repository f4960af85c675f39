//! AIKYA Nearby - free meal center finder for the AIKYA platform
//!
//! Ranks a static catalog of meal centers (langars, temple kitchens,
//! community kitchens) by great-circle distance from the caller and serves
//! the results over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_by_proximity, haversine_distance, MealFinder, ProximityError};
pub use models::{CenterCategory, Coordinate, Located, MealCenter, Nearby};
