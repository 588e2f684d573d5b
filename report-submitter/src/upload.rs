use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::UploadError;
use crate::models::ImageReference;
use crate::util::truncate_body;

#[async_trait]
pub trait ImageUpload: Send + Sync {
    async fn upload(&self, image: &ImageReference) -> Result<String, UploadError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    link: Option<String>,
}

/// Imgur-style image host client. One POST per upload, no retry.
#[derive(Clone)]
pub struct ImageHostClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl ImageHostClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.http_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.image_host_base_url.trim_end_matches('/').to_string(),
            client_id: cfg.image_host_client_id.clone(),
        })
    }
}

#[async_trait]
impl ImageUpload for ImageHostClient {
    async fn upload(&self, image: &ImageReference) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(image.as_str()).await.map_err(|source| {
            UploadError::Read { path: image.as_str().to_string(), source }
        })?;

        // Every upload is labeled a JPEG named report-image.jpg, whatever the
        // source encoding actually is. Known limitation.
        let part = multipart::Part::bytes(bytes)
            .file_name("report-image.jpg")
            .mime_str("image/jpeg")?;
        let form = multipart::Form::new().part("image", part);

        let res = self
            .http
            .post(format!("{}/3/image", self.base_url))
            .header(AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(UploadError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }
        let body: UploadResponse = res.json().await?;
        body.data.link.ok_or(UploadError::MissingLink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_extracts_link() {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"data":{"id":"abc","link":"https://i.example/abc.jpg"},"success":true,"status":200}"#,
        )
        .unwrap();
        assert_eq!(parsed.data.link.as_deref(), Some("https://i.example/abc.jpg"));
    }

    #[test]
    fn test_upload_response_without_link() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"data":{"id":"abc"},"success":true}"#).unwrap();
        assert!(parsed.data.link.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_image_is_a_read_error() {
        let cfg = Config {
            geocoder_base_url: String::new(),
            weather_base_url: String::new(),
            image_host_base_url: "https://api.example".to_string(),
            relay_base_url: String::new(),
            image_host_client_id: "cid".to_string(),
            user_agent: "test".to_string(),
            http_timeout: std::time::Duration::from_secs(5),
        };
        let client = ImageHostClient::new(&cfg).unwrap();
        let result = client.upload(&ImageReference::new("/no/such/image.jpg")).await;
        assert!(matches!(result, Err(UploadError::Read { .. })));
    }
}
