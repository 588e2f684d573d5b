use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::RelayError;
use crate::models::Report;
use crate::util::truncate_body;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    description: &'a str,
    location: &'a str,
    #[serde(rename = "currentLocation")]
    current_location: &'a str,
    #[serde(rename = "imageUrl")]
    image_url: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    message: String,
}

#[async_trait]
pub trait ReportRelay: Send + Sync {
    async fn forward(&self, report: &Report, email: &str) -> Result<String, RelayError>;
}

/// Client for the email-relay service. Forwarding happens after persistence;
/// a relay failure never rolls the report back.
#[derive(Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.http_timeout)
            .build()?;
        Ok(Self { http, base_url: cfg.relay_base_url.trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl ReportRelay for RelayClient {
    async fn forward(&self, report: &Report, email: &str) -> Result<String, RelayError> {
        let payload = SendEmailRequest {
            description: &report.description,
            location: &report.location,
            current_location: &report.current_location,
            image_url: &report.image_url,
            email,
        };
        let res = self
            .http
            .post(format!("{}/send-email", self.base_url))
            .json(&payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(RelayError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }
        let body: SendEmailResponse = res.json().await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_wire_field_names() {
        let payload = SendEmailRequest {
            description: "desc",
            location: "{\"latitude\":1.0,\"longitude\":2.0}",
            current_location: "Rua X",
            image_url: "https://i.example/a.jpg",
            email: "ong@example.org",
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["currentLocation"], "Rua X");
        assert_eq!(value["imageUrl"], "https://i.example/a.jpg");
        assert_eq!(value["email"], "ong@example.org");
    }

    #[test]
    fn test_response_parsing() {
        let parsed: SendEmailResponse =
            serde_json::from_str(r#"{"message":"E-mail enviado com sucesso!"}"#).unwrap();
        assert_eq!(parsed.message, "E-mail enviado com sucesso!");
    }
}
