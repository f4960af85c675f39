// Service exports
pub mod catalog;
pub mod geolocation;
pub mod submissions;

pub use catalog::{CatalogError, CenterCatalog};
pub use geolocation::{locate_with_timeout, resolve_position, GeoError, GeoLocator, IpGeoLocator, PositionPolicy};
pub use submissions::{SubmissionError, SubmissionQueue};
