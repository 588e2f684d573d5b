use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub http_port: u16,

    // SendGrid
    pub sendgrid_api_key: String,
    pub sendgrid_from_name: String,
    pub sendgrid_from_email: String,

    pub mail_subject: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let http_port: u16 = env("PORT", "3000").parse().context("PORT parse")?;

        let sendgrid_api_key = env("SENDGRID_API_KEY", "");
        let sendgrid_from_name = env("SENDGRID_FROM_NAME", "EcoReport");
        let sendgrid_from_email = env("SENDGRID_FROM_EMAIL", "denuncias@ecoreport.example");

        let mail_subject = env("MAIL_SUBJECT", "Nova Denúncia");

        Ok(Self {
            http_port,
            sendgrid_api_key,
            sendgrid_from_name,
            sendgrid_from_email,
            mail_subject,
        })
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
