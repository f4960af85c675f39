// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CenterCategory, Coordinate, Located, MealCenter, Nearby, PendingCenter, PositionSource, ResolvedPosition, UnknownCategory};
pub use requests::{NearbyQuery, SubmitCenterRequest};
pub use responses::{CategoriesResponse, CenterDetailResponse, ErrorResponse, HealthResponse, LocationResponse, NearbyCenter, NearbyResponse, ShareLinks, SubmissionsResponse, SubmitCenterResponse};
