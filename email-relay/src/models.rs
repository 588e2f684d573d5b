use serde::{Deserialize, Serialize};

/// Body of `POST /send-email`, field names as the mobile client sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "currentLocation", default)]
    pub current_location: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub message: String,
}

/// Plain-text body forwarded to the recipient.
pub fn mail_text(req: &SendEmailRequest) -> String {
    format!(
        "Descrição: {}\nLocalização: {}\nImagem: {}",
        req.description, req.current_location, req.image_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_client_field_names() {
        let req: SendEmailRequest = serde_json::from_str(
            r#"{
                "description": "bueiro entupido",
                "location": "{\"latitude\":-23.55,\"longitude\":-46.63}",
                "currentLocation": "Rua X",
                "imageUrl": "https://i.example/abc.jpg",
                "email": "ong@example.org"
            }"#,
        )
        .unwrap();
        assert_eq!(req.current_location, "Rua X");
        assert_eq!(req.image_url, "https://i.example/abc.jpg");
    }

    #[test]
    fn test_mail_text_layout() {
        let req = SendEmailRequest {
            description: "bueiro entupido".to_string(),
            location: String::new(),
            current_location: "Rua X".to_string(),
            image_url: "https://i.example/abc.jpg".to_string(),
            email: "ong@example.org".to_string(),
        };
        assert_eq!(
            mail_text(&req),
            "Descrição: bueiro entupido\nLocalização: Rua X\nImagem: https://i.example/abc.jpg"
        );
    }

    #[test]
    fn test_request_requires_recipient() {
        let req: Result<SendEmailRequest, _> =
            serde_json::from_str(r#"{"description":"x"}"#);
        assert!(req.is_err());
    }
}
