use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// JSON encoding used for the persisted `location` field.
    pub fn to_location_string(&self) -> String {
        serde_json::json!({
            "latitude": self.latitude,
            "longitude": self.longitude,
        })
        .to_string()
    }
}

/// Opaque handle to a picked or captured photo (local path or URI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// In-progress form state, owned by the caller. The pipeline only reads it, so
/// a failed submission leaves every field in place for a retry.
#[derive(Debug, Clone, Default)]
pub struct DraftReport {
    pub description: String,
    pub coordinates: Option<Coordinates>,
    pub resolved_address: String,
    pub image: Option<ImageReference>,
}

impl DraftReport {
    /// Last write wins: any successful pick replaces the previous image.
    pub fn attach_image(&mut self, image: ImageReference) {
        self.image = Some(image);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub description: String,
    pub location: String,
    #[serde(rename = "currentLocation")]
    pub current_location: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Timestamp-derived report id. The counter suffix keeps two submissions in
/// the same millisecond distinct within a process.
pub fn new_report_id() -> String {
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", Utc::now().timestamp_millis(), n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_string_is_json_with_both_axes() {
        let coords = Coordinates { latitude: -23.55, longitude: -46.63 };
        let encoded = coords.to_location_string();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["latitude"], -23.55);
        assert_eq!(value["longitude"], -46.63);
    }

    #[test]
    fn test_report_ids_are_distinct() {
        let a = new_report_id();
        let b = new_report_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_attach_image_replaces_previous() {
        let mut draft = DraftReport::default();
        draft.attach_image(ImageReference::new("file:///a.jpg"));
        draft.attach_image(ImageReference::new("file:///b.png"));
        assert_eq!(draft.image, Some(ImageReference::new("file:///b.png")));
    }

    #[test]
    fn test_report_serializes_with_wire_field_names() {
        let report = Report {
            id: "1-0".to_string(),
            description: "lixo acumulado".to_string(),
            location: "{}".to_string(),
            current_location: "Rua X".to_string(),
            image_url: "https://i.example/abc.jpg".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["currentLocation"], "Rua X");
        assert_eq!(value["imageUrl"], "https://i.example/abc.jpg");
    }
}
