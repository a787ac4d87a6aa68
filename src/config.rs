//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDER_STORE_URL` - base URL of the hosted order store project
//! - `ORDER_STORE_API_KEY` - API key for the order store
//!
//! ## Optional
//! - `PORT` - listen port (default: 8080)
//! - `GEMINI_API_KEY` - generative-language API key; without it the
//!   assistant features answer with their fixed unavailability strings
//! - `GEMINI_MODEL` - model name (default: gemini-2.5-flash)

use std::fmt;

use thiserror::Error;

use crate::services::assistant;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Clone)]
pub struct ShopConfig {
    pub port: u16,
    pub order_store_url: String,
    pub order_store_api_key: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl ShopConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match optional("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), format!("{e}")))?,
            None => 8080,
        };

        Ok(Self {
            port,
            order_store_url: required("ORDER_STORE_URL")?,
            order_store_api_key: required("ORDER_STORE_API_KEY")?,
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_model: optional("GEMINI_MODEL")
                .unwrap_or_else(|| assistant::DEFAULT_MODEL.to_string()),
        })
    }
}

// Keys stay out of logs.
impl fmt::Debug for ShopConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopConfig")
            .field("port", &self.port)
            .field("order_store_url", &self.order_store_url)
            .field("order_store_api_key", &"[REDACTED]")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_deref().map(|_| "[REDACTED]"),
            )
            .field("gemini_model", &self.gemini_model)
            .finish()
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Unset and empty are both treated as absent.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test owns all env mutation so parallel tests never race on it
    #[test]
    fn from_env_round_trip() {
        std::env::remove_var("ORDER_STORE_URL");
        assert!(matches!(
            ShopConfig::from_env(),
            Err(ConfigError::MissingEnvVar(name)) if name == "ORDER_STORE_URL"
        ));

        std::env::set_var("ORDER_STORE_URL", "https://project.supabase.co");
        std::env::set_var("ORDER_STORE_API_KEY", "anon-key");
        std::env::remove_var("PORT");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEMINI_MODEL");

        let config = ShopConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.order_store_url, "https://project.supabase.co");
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, assistant::DEFAULT_MODEL);

        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            ShopConfig::from_env(),
            Err(ConfigError::InvalidEnvVar(name, _)) if name == "PORT"
        ));
        std::env::remove_var("PORT");

        let debug = format!("{:?}", ShopConfig::from_env().unwrap());
        assert!(!debug.contains("anon-key"));
    }
}
