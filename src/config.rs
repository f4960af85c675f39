use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub geolocation: GeolocationSettings,
    #[serde(default)]
    pub proximity: ProximitySettings,
    #[serde(default)]
    pub links: LinkSettings,
    #[serde(default)]
    pub submissions: SubmissionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> String { "data/meal_centers.toml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationSettings {
    /// URL template with an `{ip}` placeholder; unset disables lookups
    pub endpoint: Option<String>,
    #[serde(default = "default_geo_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_geo_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_geo_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_geo_timeout(),
            cache_ttl_secs: default_geo_cache_ttl(),
            cache_size: default_geo_cache_size(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

fn default_geo_timeout() -> u64 { 10 }
fn default_geo_cache_ttl() -> u64 { 600 }
fn default_geo_cache_size() -> u64 { 10_000 }
fn default_fallback_latitude() -> f64 { 28.6139 }
fn default_fallback_longitude() -> f64 { 77.2090 }

#[derive(Debug, Clone, Deserialize)]
pub struct ProximitySettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_results: default_max_results(),
        }
    }
}

fn default_radius_km() -> f64 { 30.0 }
fn default_max_results() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LinkSettings {
    #[serde(default = "default_share_page_url")]
    pub share_page_url: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self { share_page_url: default_share_page_url() }
    }
}

fn default_share_page_url() -> String { "https://aikya.org/nearby-free-meal".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionSettings {
    /// Pending submissions held for review before new ones are refused
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self { max_pending: default_max_pending() }
    }
}

fn default_max_pending() -> usize { 1_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AIKYA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AIKYA__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AIKYA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
