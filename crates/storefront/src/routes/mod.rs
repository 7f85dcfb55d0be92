//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (privacy banner demo)
//! GET  /health                 - Health check
//! GET  /static/*               - Fingerprinted static assets
//! *    (anything else)         - 404 page
//! ```

pub mod home;

use axum::{Router, http::Uri, routing::get};

use crate::error::AppError;
use crate::state::AppState;

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home::home))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The storefront has no backing
/// services to check.
pub async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown paths.
///
/// # Errors
///
/// Always returns [`AppError::NotFound`].
pub async fn not_found(uri: Uri) -> Result<(), AppError> {
    Err(AppError::NotFound(uri.path().to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::config::StorefrontConfig;
    use crate::state::AppState;

    fn test_state() -> AppState {
        let config = StorefrontConfig::from_vars(|key| {
            match key {
                "SHOPIFY_STORE" => Some("shop.example.com"),
                "SHOPIFY_STOREFRONT_PUBLIC_TOKEN" => Some("tok123"),
                "SHOPIFY_CHECKOUT_DOMAIN" => Some("checkout.example.com"),
                "STOREFRONT_ROOT_DOMAIN" => Some("example.com"),
                _ => None,
            }
            .map(String::from)
        })
        .unwrap();
        AppState::new(config).unwrap()
    }

    async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = crate::app(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_home_renders_banner_script_once() {
        let (status, headers, body) = get("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            headers[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert_eq!(body.matches("privacy-banner/storefront-banner.js").count(), 1);
        assert!(body.contains(r#"id="consent-privacy-banner""#));
    }

    #[tokio::test]
    async fn test_home_embeds_banner_options() {
        let (_, _, body) = get("/").await;

        assert!(body.contains(r#"id="privacy-banner-options""#));
        assert!(body.contains(r#""checkoutRootDomain":"checkout.example.com""#));
        assert!(body.contains(r#""shopDomain":"shop.example.com""#));
        assert!(body.contains(r#""storefrontAccessToken":"tok123""#));
        assert!(body.contains(r#""storefrontRootDomain":"example.com""#));
    }

    #[tokio::test]
    async fn test_home_links_to_preview() {
        let (_, _, body) = get("/?utm_source=mail").await;

        // Once in the instructions, once in the link
        assert_eq!(body.matches("preview_privacy_banner=1").count(), 2);
        assert!(body.contains("utm_source=mail"));
        assert!(!body.contains("Preview mode is on"));
    }

    #[tokio::test]
    async fn test_home_reports_preview_mode() {
        let (_, _, body) = get("/?preview_privacy_banner=1").await;
        assert!(body.contains("Preview mode is on"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (status, _, body) = get("/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("does-not-exist"));
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let (_, headers, _) = get("/").await;

        let csp = headers[header::CONTENT_SECURITY_POLICY].to_str().unwrap();
        assert!(csp.contains("script-src 'self' https://cdn.shopify.com"));
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
        assert_eq!(headers["cross-origin-embedder-policy"], "credentialless");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let (_, headers, _) = get("/health").await;
        let id = headers["x-request-id"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
