use anyhow::{Context, Result};

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_REPORT_SUBJECT: &str = "Your numerology report";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub report_email_subject: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            mail_api_url: optional_env("MAIL_API_URL", DEFAULT_MAIL_API_URL),
            mail_api_key: require_env("MAIL_API_KEY")?,
            mail_from: require_env("MAIL_FROM")?,
            report_email_subject: optional_env("REPORT_EMAIL_SUBJECT", DEFAULT_REPORT_SUBJECT),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
