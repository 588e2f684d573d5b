use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{LocationError, NetworkError};
use crate::models::Coordinates;

/// Platform seam for position acquisition. Implementations own the permission
/// request; denial surfaces as `LocationError::PermissionDenied`.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position supplied up front (CLI flags). No coordinates means the fix is
/// unavailable, not that permission was denied.
pub struct ExplicitPosition {
    coordinates: Option<Coordinates>,
}

impl ExplicitPosition {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl PositionProvider for ExplicitPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or_else(|| {
            LocationError::PositionUnavailable("no coordinates were provided".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    display_name: String,
}

/// Nominatim-style reverse geocoder.
#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.http_timeout)
            .build()?;
        Ok(Self { http, base_url: cfg.geocoder_base_url.trim_end_matches('/').to_string() })
    }

    pub async fn reverse(&self, coords: Coordinates) -> Result<String, NetworkError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&accept-language=pt",
            self.base_url, coords.latitude, coords.longitude
        );
        let res = self.http.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NetworkError::from_status(status.as_u16(), &body));
        }
        let body: ReverseGeocodeResponse = res.json().await?;
        Ok(first_address_segment(&body.display_name))
    }
}

/// Keeps only the first comma-delimited segment of the provider's full
/// address. Lossy on purpose; the rest of the address is discarded.
pub fn first_address_segment(display_name: &str) -> String {
    display_name.split(',').next().unwrap_or("").to_string()
}

/// Coordinates plus the best-effort display address.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub address: String,
}

pub struct LocationResolver<P> {
    provider: P,
    geocoder: GeocodeClient,
}

impl<P: PositionProvider> LocationResolver<P> {
    pub fn new(provider: P, geocoder: GeocodeClient) -> Self {
        Self { provider, geocoder }
    }

    /// Acquires a position fix, then reverse-geocodes it. Coordinates are
    /// required; the address is best-effort and left empty if the lookup
    /// fails.
    pub async fn resolve(&self) -> Result<ResolvedLocation, LocationError> {
        let coordinates = self.provider.current_position().await?;
        let address = match self.geocoder.reverse(coordinates).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!("reverse geocoding failed, leaving address empty: {:#}", e);
                String::new()
            }
        };
        Ok(ResolvedLocation { coordinates, address })
    }
}
