//! Server-side mounting of Shopify's privacy banner.
//!
//! A page mounts a [`BannerLoader`] while it renders. The page is the
//! loader's host: script tags the loader requests are collected and emitted
//! in the HTML, and the banner's global initializer is never available here
//! because it only exists once the browser has run the banner script. The
//! browser side (`static/js/privacy-banner.js`) finishes the job with the
//! same call-once rule.

use axum::http::Uri;
use privacy_banner_core::{
    BannerConfig, BannerHost, BannerLoader, PREVIEW_QUERY_PARAM, PrivacyBanner, ScriptTag,
};
use url::form_urlencoded;

/// Collects the script tags requested while a page renders.
#[derive(Debug, Default)]
pub struct PageScripts {
    scripts: Vec<ScriptTag>,
}

impl PageScripts {
    /// The collected tags, in request order.
    #[must_use]
    pub fn into_scripts(self) -> Vec<ScriptTag> {
        self.scripts
    }
}

impl BannerHost for PageScripts {
    fn load_script(&mut self, script: &ScriptTag) {
        // A document holds at most one element per id
        if self.scripts.iter().any(|s| s.id() == script.id()) {
            return;
        }
        self.scripts.push(script.clone());
    }

    fn privacy_banner(&self) -> Option<&dyn PrivacyBanner> {
        None
    }
}

/// Everything a template needs to render the privacy banner.
#[derive(Debug, Clone)]
pub struct BannerView {
    /// Script tags to emit, in order.
    pub scripts: Vec<ScriptTag>,
    /// Options handed to `privacyBanner.loadBanner` in the browser.
    pub options: BannerConfig,
    /// Whether the request asked the banner to force-display.
    pub preview: bool,
    /// Link to the current page with preview mode switched on.
    pub preview_href: String,
}

impl BannerView {
    /// Mount the banner for a page being rendered for `uri`.
    #[must_use]
    pub fn mount(config: BannerConfig, uri: &Uri) -> Self {
        let mut page = PageScripts::default();
        let loader = BannerLoader::mount(config, &mut page);

        tracing::debug!(
            state = ?loader.state(),
            shop = loader.config().shop_domain(),
            "Privacy banner mounted"
        );

        Self {
            scripts: page.into_scripts(),
            options: loader.config().clone(),
            preview: is_preview(uri),
            preview_href: preview_href(uri),
        }
    }
}

/// Whether `uri` carries `preview_privacy_banner=1`.
#[must_use]
pub fn is_preview(uri: &Uri) -> bool {
    uri.query().is_some_and(|query| {
        form_urlencoded::parse(query.as_bytes())
            .any(|(key, value)| key == PREVIEW_QUERY_PARAM && value == "1")
    })
}

/// The path and query of `uri` with `preview_privacy_banner=1` added.
///
/// Other query pairs are kept in order; an existing preview pair is replaced.
#[must_use]
pub fn preview_href(uri: &Uri) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(existing) = uri.query() {
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            if key != PREVIEW_QUERY_PARAM {
                query.append_pair(&key, &value);
            }
        }
    }
    query.append_pair(PREVIEW_QUERY_PARAM, "1");

    format!("{}?{}", uri.path(), query.finish())
}
