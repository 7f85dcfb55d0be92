//! Integration tests for the privacy banner storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p privacy-banner-integration-tests
//! ```
//!
//! The helpers here build the storefront router in-process with a fixed
//! shop configuration; no server or network access is needed.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use privacy_banner_core::BannerConfig;
use privacy_banner_storefront::config::StorefrontConfig;
use privacy_banner_storefront::state::AppState;
use tower::ServiceExt;

/// Shop values every test storefront is configured with.
pub const SHOP_DOMAIN: &str = "shop.example.com";
pub const CHECKOUT_DOMAIN: &str = "checkout.example.com";
pub const STOREFRONT_TOKEN: &str = "tok123";
pub const ROOT_DOMAIN: &str = "example.com";

/// The banner options matching the test configuration.
#[must_use]
pub fn test_banner_config() -> BannerConfig {
    BannerConfig::new(CHECKOUT_DOMAIN, SHOP_DOMAIN, STOREFRONT_TOKEN, ROOT_DOMAIN)
}

/// Storefront configuration for tests.
///
/// # Panics
///
/// Panics if the fixed test variables fail to load.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig::from_vars(|key| {
        match key {
            "SHOPIFY_STORE" => Some(SHOP_DOMAIN),
            "SHOPIFY_STOREFRONT_PUBLIC_TOKEN" => Some(STOREFRONT_TOKEN),
            "SHOPIFY_CHECKOUT_DOMAIN" => Some(CHECKOUT_DOMAIN),
            "STOREFRONT_ROOT_DOMAIN" => Some(ROOT_DOMAIN),
            _ => None,
        }
        .map(String::from)
    })
    .expect("test configuration is complete")
}

/// The storefront router built from [`test_config`].
///
/// # Panics
///
/// Panics if application state cannot be built.
#[must_use]
pub fn test_app() -> Router {
    let state = AppState::new(test_config()).expect("test state builds");
    privacy_banner_storefront::app(state)
}

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Send a request through a fresh test router.
///
/// # Panics
///
/// Panics if the request cannot be served or the body is not UTF-8.
pub async fn send(request: Request<Body>) -> TestResponse {
    let response = test_app()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("body is UTF-8"),
    }
}

/// `GET` a path through a fresh test router.
///
/// # Panics
///
/// Panics if the request cannot be built or served.
pub async fn get(uri: &str) -> TestResponse {
    send(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    )
    .await
}
