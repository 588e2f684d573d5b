use anyhow::{Context, Result};
use std::time::Duration;

use crate::util::mask_secret;

#[derive(Clone, Debug)]
pub struct Config {
    // Third-party endpoints
    pub geocoder_base_url: String,
    pub weather_base_url: String,
    pub image_host_base_url: String,
    pub relay_base_url: String,

    // Image host credential, sent as `Authorization: Client-ID ...`
    pub image_host_client_id: String,

    pub user_agent: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let geocoder_base_url = env("GEOCODER_BASE_URL", "https://nominatim.openstreetmap.org");
        let weather_base_url = env("WEATHER_BASE_URL", "https://api.open-meteo.com/v1");
        let image_host_base_url = env("IMAGE_HOST_BASE_URL", "https://api.imgur.com");
        let relay_base_url = env("RELAY_BASE_URL", "http://localhost:3000");

        let image_host_client_id = env("IMAGE_HOST_CLIENT_ID", "");
        let user_agent = env("USER_AGENT", "ecoreport-submitter/0.1");
        let http_timeout =
            humantime::parse_duration(&env("HTTP_TIMEOUT", "30s")).context("HTTP_TIMEOUT parse")?;

        Ok(Self {
            geocoder_base_url,
            weather_base_url,
            image_host_base_url,
            relay_base_url,
            image_host_client_id,
            user_agent,
            http_timeout,
        })
    }

    pub fn masked_client_id(&self) -> String {
        mask_secret(&self.image_host_client_id, 3, 2)
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_client_id_hides_middle() {
        let cfg = Config {
            geocoder_base_url: String::new(),
            weather_base_url: String::new(),
            image_host_base_url: String::new(),
            relay_base_url: String::new(),
            image_host_client_id: "0123456789abcdef".to_string(),
            user_agent: String::new(),
            http_timeout: Duration::from_secs(30),
        };
        let masked = cfg.masked_client_id();
        assert!(masked.starts_with("012"));
        assert!(masked.ends_with("ef"));
        assert!(!masked.contains("3456789abcd"));
    }
}
