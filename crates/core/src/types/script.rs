//! Script tags and the fixed locations of Shopify's privacy banner.

/// Element id of the banner script tag.
pub const PRIVACY_BANNER_SCRIPT_ID: &str = "consent-privacy-banner";

/// Where Shopify serves the storefront privacy banner.
pub const PRIVACY_BANNER_SCRIPT_URL: &str =
    "https://cdn.shopify.com/shopifycloud/privacy-banner/storefront-banner.js";

/// Origin of [`PRIVACY_BANNER_SCRIPT_URL`], for Content-Security-Policy sources.
pub const PRIVACY_BANNER_ORIGIN: &str = "https://cdn.shopify.com";

/// Query parameter the banner script reads to force-display itself.
///
/// Handled entirely by Shopify's script; the storefront only links to it.
pub const PREVIEW_QUERY_PARAM: &str = "preview_privacy_banner";

/// A script element a host is asked to insert into the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptTag {
    id: String,
    src: String,
    defer: bool,
}

impl ScriptTag {
    /// Create a render-blocking script tag.
    #[must_use]
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            defer: false,
        }
    }

    /// Load the script without blocking rendering.
    #[must_use]
    pub const fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }

    /// The Shopify privacy banner script.
    #[must_use]
    pub fn privacy_banner() -> Self {
        Self::new(PRIVACY_BANNER_SCRIPT_ID, PRIVACY_BANNER_SCRIPT_URL).deferred()
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Script source URL.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Whether the script is loaded deferred.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        self.defer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_banner_tag() {
        let tag = ScriptTag::privacy_banner();

        assert_eq!(tag.id(), "consent-privacy-banner");
        assert_eq!(
            tag.src(),
            "https://cdn.shopify.com/shopifycloud/privacy-banner/storefront-banner.js"
        );
        assert!(tag.is_deferred());
    }

    #[test]
    fn test_new_tag_is_not_deferred() {
        let tag = ScriptTag::new("analytics", "/static/js/analytics.js");
        assert!(!tag.is_deferred());
        assert!(tag.deferred().is_deferred());
    }

    #[test]
    fn test_banner_url_is_served_from_origin() {
        assert!(PRIVACY_BANNER_SCRIPT_URL.starts_with(PRIVACY_BANNER_ORIGIN));
    }
}
