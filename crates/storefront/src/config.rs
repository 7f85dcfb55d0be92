//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PUBLIC_TOKEN` - Storefront API public access token
//! - `SHOPIFY_CHECKOUT_DOMAIN` - Root domain checkout is served from
//! - `STOREFRONT_ROOT_DOMAIN` - Root domain the storefront is served from
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use privacy_banner_core::BannerConfig;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Shopify shop configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Shopify shop configuration used by the privacy banner.
///
/// Every value here ends up in the page served to browsers, so nothing is
/// treated as a secret.
#[derive(Debug, Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Storefront API public access token (safe to expose in browser)
    pub storefront_public_token: String,
    /// Root domain checkout is served from
    pub checkout_domain: String,
    /// Root domain the storefront is served from
    pub storefront_root_domain: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let host = vars.parse_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = vars.parse_or_default("STOREFRONT_PORT", "3000")?;
        let static_dir = PathBuf::from(
            vars.get_or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"),
        );
        let log_format = vars.parse_or_default("STOREFRONT_LOG_FORMAT", "text")?;

        let shopify = ShopifyStorefrontConfig::from_vars(&vars)?;

        Ok(Self {
            host,
            port,
            static_dir,
            log_format,
            shopify,
            sentry_dsn: vars.get_optional("SENTRY_DSN"),
            sentry_environment: vars.get_optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: vars.parse_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: vars
                .parse_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            store: vars.get_required("SHOPIFY_STORE")?,
            storefront_public_token: vars.get_required("SHOPIFY_STOREFRONT_PUBLIC_TOKEN")?,
            checkout_domain: vars.get_required("SHOPIFY_CHECKOUT_DOMAIN")?,
            storefront_root_domain: vars.get_required("STOREFRONT_ROOT_DOMAIN")?,
        })
    }

    /// The options the privacy banner is initialized with.
    #[must_use]
    pub fn banner_config(&self) -> BannerConfig {
        BannerConfig::new(
            &self.checkout_domain,
            &self.store,
            &self.storefront_public_token,
            &self.storefront_root_domain,
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup shared by the loaders above.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable.
    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable, treating an empty value as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to a default.
    fn parse_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
