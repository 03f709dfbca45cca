use std::env;

use tracing::warn;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// HTTP endpoint rendered mails are posted to; absent means log-only.
    pub mail_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/gather".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(port) => Some(port),
                    Err(e) => {
                        warn!("Invalid PORT value: {e}, using default");
                        None
                    }
                })
                .unwrap_or(3001),
            mail_webhook_url: env::var("MAIL_WEBHOOK_URL").ok(),
        }
    }
}
