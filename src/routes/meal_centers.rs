use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use validator::Validate;

use crate::core::{links, parse_category_filter, CenterQuery, MealFinder};
use crate::models::{
    CategoriesResponse, CenterDetailResponse, Coordinate, ErrorResponse, HealthResponse,
    LocationResponse, NearbyCenter, NearbyQuery, NearbyResponse, PositionSource, ResolvedPosition,
    SubmissionsResponse, SubmitCenterRequest, SubmitCenterResponse,
};
use crate::services::{resolve_position, CenterCatalog, IpGeoLocator, PositionPolicy, SubmissionQueue};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CenterCatalog>,
    pub submissions: Arc<SubmissionQueue>,
    pub locator: Arc<IpGeoLocator>,
    pub finder: MealFinder,
    pub position_policy: PositionPolicy,
    pub share_page_url: String,
}

/// Configure all meal center routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/location", web::get().to(locate_caller))
        .route("/meal-centers", web::get().to(find_nearby))
        .route("/meal-centers/categories", web::get().to(list_categories))
        .service(
            web::resource("/meal-centers/submissions")
                .route(web::get().to(list_submissions))
                .route(web::post().to(submit_center)),
        )
        .route("/meal-centers/{id}", web::get().to(get_center));
}

fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Public address of the caller, if it is worth geolocating
fn client_ip(req: &HttpRequest) -> Option<String> {
    let info = req.connection_info();
    let raw = info.realip_remote_addr()?;

    let ip = raw
        .parse::<IpAddr>()
        .or_else(|_| raw.parse::<SocketAddr>().map(|addr| addr.ip()))
        .ok()?;

    let local = match ip {
        IpAddr::V4(v4) => v4.is_loopback() || v4.is_private() || v4.is_unspecified() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    };

    (!local).then(|| ip.to_string())
}

/// Use the caller's coordinates when both are given, otherwise geolocate
async fn search_origin(
    state: &AppState,
    req: &HttpRequest,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<ResolvedPosition, HttpResponse> {
    match (lat, lng) {
        (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude)
            .map(|coordinate| ResolvedPosition {
                coordinate,
                source: PositionSource::Client,
            })
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, "Invalid coordinates", e)),
        (None, None) => Ok(resolve_position(
            state.locator.as_ref(),
            client_ip(req).as_deref(),
            &state.position_policy,
        )
        .await),
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "Invalid coordinates",
            "lat and lng must be provided together",
        )),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the caller's position
///
/// GET /api/v1/location
async fn locate_caller(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let resolved = resolve_position(
        state.locator.as_ref(),
        client_ip(&req).as_deref(),
        &state.position_policy,
    )
    .await;

    HttpResponse::Ok().json(LocationResponse {
        position: resolved.coordinate,
        source: resolved.source,
    })
}

/// Nearby search endpoint
///
/// GET /api/v1/meal-centers?lat=28.61&lng=77.20&radiusKm=10&search=langar&type=Gurudwara&limit=20&activeOnly=true
async fn find_nearby(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
    req: HttpRequest,
) -> impl Responder {
    let query = query.into_inner();

    let category = match parse_category_filter(query.category.as_deref()) {
        Ok(category) => category,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid type", e),
    };

    let origin = match search_origin(&state, &req, query.lat, query.lng).await {
        Ok(origin) => origin,
        Err(response) => return response,
    };

    let center_query = CenterQuery {
        search: query.search,
        category,
        radius_km: query.radius_km,
        limit: query.limit,
        active_only: query.active_only,
    };

    let result = match state
        .finder
        .find_nearby(origin.coordinate, state.catalog.all(), &center_query)
    {
        Ok(result) => result,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "Invalid search", e),
    };

    let centers: Vec<NearbyCenter> = result
        .centers
        .into_iter()
        .map(|nearby| NearbyCenter {
            directions_url: links::directions_url(&nearby.record),
            distance_km: nearby.distance_km,
            center: nearby.record,
        })
        .collect();

    tracing::info!(
        "Returning {} meal centers within {} km of ({}, {}) [{:?}]",
        centers.len(),
        result.radius_km,
        origin.coordinate.latitude,
        origin.coordinate.longitude,
        origin.source
    );

    HttpResponse::Ok().json(NearbyResponse {
        origin: origin.coordinate,
        origin_source: origin.source,
        radius_km: result.radius_km,
        total_results: centers.len(),
        total_candidates: result.total_candidates,
        centers,
    })
}

/// Categories present in the catalog
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CategoriesResponse {
        categories: state.catalog.categories(),
    })
}

/// Center detail with directions and share links
///
/// GET /api/v1/meal-centers/{id}
async fn get_center(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();

    match state.catalog.get(id) {
        Some(center) => HttpResponse::Ok().json(CenterDetailResponse {
            directions_url: links::directions_url(center),
            share_links: links::share_links(center, &state.share_page_url),
            center: center.clone(),
        }),
        None => error_response(
            StatusCode::NOT_FOUND,
            "Meal center not found",
            format!("No meal center with id {}", id),
        ),
    }
}

/// Submit a meal center for review
///
/// POST /api/v1/meal-centers/submissions
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "type": "Gurudwara",
///   "address": "string",
///   "lat": 28.6,
///   "lng": 77.2,
///   "timings": "string",
///   "contact": "string",
///   "description": "string",
///   "capacity": 100
/// }
/// ```
async fn submit_center(
    state: web::Data<AppState>,
    body: web::Json<SubmitCenterRequest>,
    req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = body.validate() {
        tracing::info!("Validation failed for meal center submission: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let request = body.into_inner();

    let position = match search_origin(&state, &req, request.lat, request.lng).await {
        Ok(position) => position,
        Err(response) => return response,
    };

    let submission = match state.submissions.submit(request, position).await {
        Ok(submission) => submission,
        Err(e) => return error_response(StatusCode::SERVICE_UNAVAILABLE, "Submissions paused", e),
    };

    HttpResponse::Accepted().json(SubmitCenterResponse {
        success: true,
        message: "Meal center submitted successfully! It will be reviewed and published soon."
            .to_string(),
        submission,
    })
}

/// Pending submissions awaiting review
async fn list_submissions(state: web::Data<AppState>) -> impl Responder {
    let submissions = state.submissions.pending().await;

    HttpResponse::Ok().json(SubmissionsResponse {
        count: submissions.len(),
        submissions,
    })
}
