//! Privacy banner configuration.

use serde::{Deserialize, Serialize};

/// The values Shopify's privacy banner is initialized with.
///
/// Serializes to the `options` object `privacyBanner.loadBanner` expects:
///
/// ```json
/// {
///   "checkoutRootDomain": "checkout.example.com",
///   "shopDomain": "shop.example.com",
///   "storefrontAccessToken": "tok123",
///   "storefrontRootDomain": "example.com"
/// }
/// ```
///
/// No validation is performed. Every field is handed to the banner verbatim,
/// so an empty or malformed domain surfaces as a banner that never shows,
/// not as an error here.
///
/// ## Examples
///
/// ```
/// use privacy_banner_core::BannerConfig;
///
/// let config = BannerConfig::new(
///     "checkout.example.com",
///     "shop.example.com",
///     "tok123",
///     "example.com",
/// );
/// assert_eq!(config.shop_domain(), "shop.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerConfig {
    checkout_root_domain: String,
    shop_domain: String,
    storefront_access_token: String,
    storefront_root_domain: String,
}

impl BannerConfig {
    /// Create a configuration from its four parts.
    #[must_use]
    pub fn new(
        checkout_root_domain: impl Into<String>,
        shop_domain: impl Into<String>,
        storefront_access_token: impl Into<String>,
        storefront_root_domain: impl Into<String>,
    ) -> Self {
        Self {
            checkout_root_domain: checkout_root_domain.into(),
            shop_domain: shop_domain.into(),
            storefront_access_token: storefront_access_token.into(),
            storefront_root_domain: storefront_root_domain.into(),
        }
    }

    /// Domain checkout is served from (e.g. `checkout.example.com`).
    #[must_use]
    pub fn checkout_root_domain(&self) -> &str {
        &self.checkout_root_domain
    }

    /// Shopify shop domain (e.g. `your-store.myshopify.com`).
    #[must_use]
    pub fn shop_domain(&self) -> &str {
        &self.shop_domain
    }

    /// Public Storefront API access token.
    #[must_use]
    pub fn storefront_access_token(&self) -> &str {
        &self.storefront_access_token
    }

    /// Root domain the storefront is served from.
    #[must_use]
    pub fn storefront_root_domain(&self) -> &str {
        &self.storefront_root_domain
    }
}
