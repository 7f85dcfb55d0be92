//! Application state shared across handlers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use privacy_banner_core::BannerConfig;

use crate::config::StorefrontConfig;
use crate::middleware::security_headers::content_security_policy;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("shop domains produce an invalid Content-Security-Policy header: {0}")]
    InvalidCsp(#[from] InvalidHeaderValue),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and values derived from it once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    banner: BannerConfig,
    csp: HeaderValue,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured shop domains cannot be placed in a
    /// `Content-Security-Policy` header.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let banner = config.shopify.banner_config();
        let csp = HeaderValue::try_from(content_security_policy(&banner))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                banner,
                csp,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the privacy banner options for this shop.
    #[must_use]
    pub fn banner(&self) -> &BannerConfig {
        &self.inner.banner
    }

    /// Get the `Content-Security-Policy` header value.
    #[must_use]
    pub fn csp(&self) -> &HeaderValue {
        &self.inner.csp
    }
}
