use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

pub async fn send_sendgrid_email(
    api_key: &str,
    from_name: &str,
    from_email: &str,
    to_email: &str,
    subject: &str,
    plain_content: &str,
) -> Result<()> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))?,
    );

    let payload = serde_json::json!({
        "personalizations": [{
            "to": [{"email": to_email}],
            "subject": subject
        }],
        "from": {"email": from_email, "name": from_name},
        "content": [
            {"type": "text/plain", "value": plain_content}
        ]
    });

    let client = reqwest::Client::new();
    let res = client
        .post("https://api.sendgrid.com/v3/mail/send")
        .headers(headers)
        .body(payload.to_string())
        .send()
        .await
        .context("sendgrid request failed")?;

    let status = res.status();
    let body = res.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("sendgrid error: status={} body={}", status, truncate(&body));
    }
    Ok(())
}

fn truncate(s: &str) -> String {
    const MAX: usize = 512;
    if s.len() <= MAX {
        return s.to_string();
    }
    // Back off to a char boundary so multibyte text cannot panic the slice.
    let mut end = MAX;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_caps_long_bodies() {
        assert_eq!(truncate("short"), "short");
        let long = "y".repeat(1000);
        let out = truncate(&long);
        assert_eq!(out.len(), 515);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_at_cut_point() {
        let body = format!("{}é{}", "y".repeat(511), "z".repeat(100));
        let out = truncate(&body);
        assert_eq!(out, format!("{}...", "y".repeat(511)));
    }
}
