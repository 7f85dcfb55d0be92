//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! Adds restrictive security headers to all responses. The policy is locked
//! down except for what Shopify's privacy banner needs: its script, styles,
//! fonts and images come from the Shopify CDN, and it talks to the shop and
//! checkout domains.

use axum::{
    extract::{Request, State},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};
use privacy_banner_core::{BannerConfig, PRIVACY_BANNER_ORIGIN};

use crate::state::AppState;

/// Build the `Content-Security-Policy` for pages that load the privacy banner.
///
/// ```text
/// default-src 'none';
/// script-src 'self' https://cdn.shopify.com;
/// style-src 'self' 'unsafe-inline' https://cdn.shopify.com;
/// font-src 'self' https://cdn.shopify.com;
/// img-src 'self' https://cdn.shopify.com;
/// connect-src 'self' https://{shop_domain} https://{checkout_root_domain};
/// frame-src 'none';
/// object-src 'none';
/// base-uri 'self';
/// form-action 'self';
/// frame-ancestors 'none';
/// upgrade-insecure-requests
/// ```
///
/// The banner injects its own `<style>` elements, hence `'unsafe-inline'`
/// for styles only.
#[must_use]
pub fn content_security_policy(banner: &BannerConfig) -> String {
    let mut connect = vec!["'self'".to_string()];
    for domain in [banner.shop_domain(), banner.checkout_root_domain()] {
        let source = format!("https://{domain}");
        if !domain.is_empty() && !connect.contains(&source) {
            connect.push(source);
        }
    }

    [
        "default-src 'none'".to_string(),
        format!("script-src 'self' {PRIVACY_BANNER_ORIGIN}"),
        format!("style-src 'self' 'unsafe-inline' {PRIVACY_BANNER_ORIGIN}"),
        format!("font-src 'self' {PRIVACY_BANNER_ORIGIN}"),
        format!("img-src 'self' {PRIVACY_BANNER_ORIGIN}"),
        format!("connect-src {}", connect.join(" ")),
        "frame-src 'none'".to_string(),
        "object-src 'none'".to_string(),
        "base-uri 'self'".to_string(),
        "form-action 'self'".to_string(),
        "frame-ancestors 'none'".to_string(),
        "upgrade-insecure-requests".to_string(),
    ]
    .join("; ")
}

/// Add security headers to all responses.
///
/// Headers applied:
/// - `X-Frame-Options: DENY` - Prevent clickjacking
/// - `X-Content-Type-Options: nosniff` - Prevent MIME sniffing
/// - `Referrer-Policy: no-referrer` - Zero referrer leakage
/// - `Content-Security-Policy` - See [`content_security_policy`]
/// - `Permissions-Policy` - Deny sensitive features
/// - `Cache-Control: no-store, max-age=0` - Unless the route set its own
/// - `Cross-Origin-Opener-Policy: same-origin` - Process isolation
/// - `Cross-Origin-Resource-Policy: same-origin` - Resource isolation
/// - `Cross-Origin-Embedder-Policy: credentialless` - Isolation that still
///   admits the CDN banner script, which sends no CORP header
/// - `X-DNS-Prefetch-Control: off` - Prevent DNS prefetch leakage
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    headers.insert(CONTENT_SECURITY_POLICY, state.csp().clone());

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), \
             display-capture=(), \
             geolocation=(), \
             microphone=(), \
             payment=(), \
             usb=(), \
             interest-cohort=(), \
             browsing-topics=()",
        ),
    );

    // Fingerprinted static assets carry their own long-lived policy
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("cross-origin-embedder-policy"),
        HeaderValue::from_static("credentialless"),
    );
    headers.insert(
        HeaderName::from_static("x-dns-prefetch-control"),
        HeaderValue::from_static("off"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_allows_banner_sources() {
        let csp = content_security_policy(&BannerConfig::new(
            "checkout.example.com",
            "shop.example.com",
            "tok123",
            "example.com",
        ));

        assert!(csp.contains("script-src 'self' https://cdn.shopify.com"));
        assert!(csp.contains(
            "connect-src 'self' https://shop.example.com https://checkout.example.com"
        ));
        assert!(csp.starts_with("default-src 'none'; "));
        assert!(csp.ends_with("upgrade-insecure-requests"));
    }

    #[test]
    fn test_csp_dedupes_shared_domain() {
        let csp = content_security_policy(&BannerConfig::new(
            "shop.example.com",
            "shop.example.com",
            "tok123",
            "example.com",
        ));

        assert!(csp.contains("connect-src 'self' https://shop.example.com;"));
    }

    #[test]
    fn test_csp_skips_empty_domain() {
        let csp = content_security_policy(&BannerConfig::new("", "shop.example.com", "t", "e"));

        assert!(csp.contains("connect-src 'self' https://shop.example.com;"));
    }
}
