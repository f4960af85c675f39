use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use aikya_nearby::config::Settings;
use aikya_nearby::core::MealFinder;
use aikya_nearby::models::Coordinate;
use aikya_nearby::routes::{self, AppState};
use aikya_nearby::services::{CenterCatalog, IpGeoLocator, PositionPolicy, SubmissionQueue};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting AIKYA nearby meal service...");

    let catalog = CenterCatalog::load(&settings.catalog.path)
        .map_err(|e| startup_error("Failed to load meal center catalog", e))?;

    if catalog.is_empty() {
        tracing::warn!("Meal center catalog at {} is empty", settings.catalog.path);
    }

    let geo = &settings.geolocation;
    let fallback = Coordinate::new(geo.fallback_latitude, geo.fallback_longitude)
        .map_err(|e| startup_error("Invalid fallback position", e))?;

    let locator = IpGeoLocator::new(
        geo.endpoint.clone(),
        Duration::from_secs(geo.timeout_secs),
        geo.cache_size,
        Duration::from_secs(geo.cache_ttl_secs),
    )
    .map_err(|e| startup_error("Failed to build geolocation client", e))?;

    if locator.is_enabled() {
        info!("IP geolocation enabled (timeout: {}s, cache TTL: {}s)", geo.timeout_secs, geo.cache_ttl_secs);
    } else {
        info!(
            "IP geolocation disabled, searches without coordinates use ({}, {})",
            fallback.latitude, fallback.longitude
        );
    }

    let finder = MealFinder::new(
        settings.proximity.default_radius_km,
        settings.proximity.max_results,
    )
    .map_err(|e| startup_error("Invalid proximity settings", e))?;

    info!("Meal finder initialized: {:?}", finder);

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        submissions: Arc::new(SubmissionQueue::new(settings.submissions.max_pending)),
        locator: Arc::new(locator),
        finder,
        position_policy: PositionPolicy {
            timeout: Duration::from_secs(geo.timeout_secs),
            fallback,
        },
        share_page_url: settings.links.share_page_url.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
