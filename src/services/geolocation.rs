use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::core::ProximityError;
use crate::models::{Coordinate, PositionSource, ResolvedPosition};

/// Errors that can occur while locating a caller
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geolocation provider returned error: {0}")]
    ApiError(String),

    #[error("Geolocation permission denied")]
    PermissionDenied,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Geolocation is not configured")]
    Unavailable,

    #[error("Geolocation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Provider returned an invalid position: {0}")]
    InvalidPosition(#[from] ProximityError),
}

/// A one-shot source of positions
pub trait GeoLocator: Send + Sync {
    /// Look up the position of the caller at `client_ip`
    fn locate(&self, client_ip: &str) -> impl Future<Output = Result<Coordinate, GeoError>> + Send;
}

/// How a search origin is resolved when the caller does not supply one
#[derive(Debug, Clone, Copy)]
pub struct PositionPolicy {
    pub timeout: Duration,
    pub fallback: Coordinate,
}

impl Default for PositionPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            // New Delhi
            fallback: Coordinate { latitude: 28.6139, longitude: 77.2090 },
        }
    }
}

/// Run one lookup under an explicit timeout
pub async fn locate_with_timeout<L: GeoLocator>(
    locator: &L,
    client_ip: &str,
    timeout: Duration,
) -> Result<Coordinate, GeoError> {
    match tokio::time::timeout(timeout, locator.locate(client_ip)).await {
        Ok(result) => result,
        Err(_) => Err(GeoError::Timeout(timeout)),
    }
}

/// Resolve the caller's position, substituting the fallback on any failure
pub async fn resolve_position<L: GeoLocator>(
    locator: &L,
    client_ip: Option<&str>,
    policy: &PositionPolicy,
) -> ResolvedPosition {
    let fallback = ResolvedPosition {
        coordinate: policy.fallback,
        source: PositionSource::Fallback,
    };

    let Some(ip) = client_ip else {
        tracing::debug!("No client address, using fallback position");
        return fallback;
    };

    match locate_with_timeout(locator, ip, policy.timeout).await {
        Ok(coordinate) => ResolvedPosition {
            coordinate,
            source: PositionSource::Geolocated,
        },
        Err(GeoError::Unavailable) => fallback,
        Err(e) => {
            tracing::warn!("Geolocation failed for {}, using fallback position: {}", ip, e);
            fallback
        }
    }
}

/// Body returned by IP geolocation providers
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    longitude: Option<f64>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// IP geolocation client
///
/// The endpoint is a URL template containing an `{ip}` placeholder, e.g.
/// `https://ipapi.co/{ip}/json/`. Successful lookups are cached per address.
pub struct IpGeoLocator {
    endpoint: Option<String>,
    client: Client,
    cache: moka::future::Cache<String, Coordinate>,
}

impl IpGeoLocator {
    /// Create a new locator; `endpoint = None` disables lookups
    pub fn new(
        endpoint: Option<String>,
        request_timeout: Duration,
        cache_size: u64,
        cache_ttl: Duration,
    ) -> Result<Self, GeoError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            client,
            cache,
        })
    }

    /// A locator that never finds anything
    pub fn disabled() -> Result<Self, GeoError> {
        Self::new(None, Duration::from_secs(1), 1, Duration::from_secs(1))
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    fn lookup_url(&self, endpoint: &str, client_ip: &str) -> String {
        endpoint.replace("{ip}", &urlencoding::encode(client_ip))
    }

    async fn fetch(&self, client_ip: &str) -> Result<Coordinate, GeoError> {
        let endpoint = self.endpoint.as_deref().ok_or(GeoError::Unavailable)?;
        let url = self.lookup_url(endpoint, client_ip);

        tracing::debug!("Looking up position from: {}", url);

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GeoError::PermissionDenied);
            }
            status if !status.is_success() => {
                return Err(GeoError::ApiError(format!("Lookup failed: {}", status)));
            }
            _ => {}
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        if body.error {
            return Err(GeoError::ApiError(
                body.reason.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinate::new(latitude, longitude)?),
            _ => Err(GeoError::InvalidResponse("Missing latitude or longitude".into())),
        }
    }
}

impl GeoLocator for IpGeoLocator {
    async fn locate(&self, client_ip: &str) -> Result<Coordinate, GeoError> {
        if let Some(coordinate) = self.cache.get(client_ip).await {
            tracing::trace!("Geolocation cache hit: {}", client_ip);
            return Ok(coordinate);
        }

        let coordinate = self.fetch(client_ip).await?;
        self.cache.insert(client_ip.to_string(), coordinate).await;

        Ok(coordinate)
    }
}
