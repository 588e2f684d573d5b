use anyhow::Result;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::NetworkError;
use crate::models::{Coordinates, CurrentWeather};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

/// Open-Meteo current-weather lookup. Display-only; failures never touch a
/// submission.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.http_timeout)
            .build()?;
        Ok(Self { http, base_url: cfg.weather_base_url.trim_end_matches('/').to_string() })
    }

    pub async fn current(&self, coords: Coordinates) -> Result<CurrentWeather, NetworkError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, coords.latitude, coords.longitude
        );
        let res = self.http.get(&url).send().await?;
        let status = res.status();
        // The forecast provider rate-limits aggressively; from_status keeps
        // the dedicated 429 message.
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NetworkError::from_status(status.as_u16(), &body));
        }
        let body: ForecastResponse = res.json().await?;
        Ok(body.current_weather)
    }
}
