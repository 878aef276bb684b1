use dotenvy::dotenv;
use serde::Deserialize;

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

#[derive(Clone, Deserialize)]
pub struct Config {
    pub app_secret_key: String,
    pub gmail_base_url: String,
}

impl Config {
    pub fn load() -> Result<Self, anyhow::Error> {
        dotenv().ok(); // Load .env if present (dev mode)

        // In production these come from actual env vars
        let app_secret_key = std::env::var("APP_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("APP_SECRET_KEY is required"))?;

        // Overridable for self-hosted gateways and tests
        let gmail_base_url =
            std::env::var("GMAIL_API_BASE_URL").unwrap_or_else(|_| GMAIL_API_BASE.to_string());

        Ok(Self {
            app_secret_key,
            gmail_base_url,
        })
    }
}
