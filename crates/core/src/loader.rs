//! The banner loader: request the script once, initialize once.
//!
//! Shopify's privacy banner arrives as a third-party script that defines a
//! global `privacyBanner.loadBanner(options)` whenever it finishes loading.
//! [`BannerLoader`] drives the two side effects that integration needs:
//!
//! 1. On mount, ask the host to insert the banner [`ScriptTag`].
//! 2. Every time the host re-renders or signals a change, look for the
//!    initializer and, the first time it is there, call it with the current
//!    [`BannerConfig`].
//!
//! ```text
//!                  initializer present
//! NotInitialized ─────────────────────▶ Initialized
//!       │  ▲                                 │
//!       └──┘ initializer absent              └── (no further calls)
//! ```
//!
//! An initializer that never appears is not an error. The loader stays
//! `NotInitialized` for as long as it lives.

use crate::types::{BannerConfig, ScriptTag};

/// The banner's global entry point (`window.privacyBanner`).
pub trait PrivacyBanner {
    /// Display the consent banner for the given shop.
    fn load_banner(&self, options: &BannerConfig);
}

/// The page a [`BannerLoader`] is mounted into.
pub trait BannerHost {
    /// Insert a script element into the document.
    fn load_script(&mut self, script: &ScriptTag);

    /// The banner's initializer, if its script has defined it yet.
    fn privacy_banner(&self) -> Option<&dyn PrivacyBanner>;
}

/// Whether a loader has called the banner's initializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// The initializer has not been called yet.
    #[default]
    NotInitialized,
    /// The initializer was called; it will not be called again.
    Initialized,
}

/// Loads and initializes the privacy banner for one mounted page.
///
/// The initialized flag belongs to this instance only. Dropping the loader
/// and mounting a new one starts over from [`LoadState::NotInitialized`].
///
/// # Example
///
/// ```
/// use privacy_banner_core::{
///     BannerConfig, BannerHost, BannerLoader, LoadState, PrivacyBanner, ScriptTag,
/// };
///
/// struct Page {
///     scripts: Vec<ScriptTag>,
/// }
///
/// impl BannerHost for Page {
///     fn load_script(&mut self, script: &ScriptTag) {
///         self.scripts.push(script.clone());
///     }
///
///     fn privacy_banner(&self) -> Option<&dyn PrivacyBanner> {
///         None
///     }
/// }
///
/// let mut page = Page { scripts: Vec::new() };
/// let config = BannerConfig::new("checkout.example.com", "shop.example.com", "tok", "example.com");
/// let loader = BannerLoader::mount(config, &mut page);
///
/// assert_eq!(page.scripts, vec![ScriptTag::privacy_banner()]);
/// assert_eq!(loader.state(), LoadState::NotInitialized);
/// ```
#[derive(Debug, Clone)]
pub struct BannerLoader {
    config: BannerConfig,
    state: LoadState,
}

impl BannerLoader {
    /// Mount a loader: request the banner script, then run the first check.
    pub fn mount<H>(config: BannerConfig, host: &mut H) -> Self
    where
        H: BannerHost + ?Sized,
    {
        host.load_script(&ScriptTag::privacy_banner());

        let mut loader = Self {
            config,
            state: LoadState::NotInitialized,
        };
        loader.check(host);
        loader
    }

    /// Re-render with a (possibly new) configuration and re-run the check.
    ///
    /// Once initialized, a changed configuration is stored but never sent to
    /// the banner.
    pub fn render<H>(&mut self, config: BannerConfig, host: &H) -> LoadState
    where
        H: BannerHost + ?Sized,
    {
        self.config = config;
        self.check(host)
    }

    /// Re-run the check with the current configuration.
    ///
    /// Hosts call this when something the loader depends on changed, such as
    /// the banner script finishing its download.
    pub fn notify<H>(&mut self, host: &H) -> LoadState
    where
        H: BannerHost + ?Sized,
    {
        self.check(host)
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Whether the initializer has been called.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state == LoadState::Initialized
    }

    /// The configuration from the most recent mount or render.
    #[must_use]
    pub const fn config(&self) -> &BannerConfig {
        &self.config
    }

    fn check<H>(&mut self, host: &H) -> LoadState
    where
        H: BannerHost + ?Sized,
    {
        if self.state == LoadState::Initialized {
            return self.state;
        }

        if let Some(banner) = host.privacy_banner() {
            banner.load_banner(&self.config);
            self.state = LoadState::Initialized;
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every `loadBanner` call.
    #[derive(Default)]
    struct RecordingBanner {
        calls: RefCell<Vec<BannerConfig>>,
    }

    impl PrivacyBanner for RecordingBanner {
        fn load_banner(&self, options: &BannerConfig) {
            self.calls.borrow_mut().push(options.clone());
        }
    }

    /// A page whose banner global can be switched on and off.
    #[derive(Default)]
    struct FakePage {
        scripts: Vec<ScriptTag>,
        banner: RecordingBanner,
        banner_defined: bool,
    }

    impl FakePage {
        fn with_banner() -> Self {
            Self {
                banner_defined: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<BannerConfig> {
            self.banner.calls.borrow().clone()
        }
    }

    impl BannerHost for FakePage {
        fn load_script(&mut self, script: &ScriptTag) {
            self.scripts.push(script.clone());
        }

        fn privacy_banner(&self) -> Option<&dyn PrivacyBanner> {
            self.banner_defined
                .then_some(&self.banner as &dyn PrivacyBanner)
        }
    }

    fn example_config() -> BannerConfig {
        BannerConfig::new(
            "checkout.example.com",
            "shop.example.com",
            "tok123",
            "example.com",
        )
    }

    fn other_config() -> BannerConfig {
        BannerConfig::new(
            "checkout.other.com",
            "shop.other.com",
            "tok456",
            "other.com",
        )
    }

    #[test]
    fn test_mount_requests_script_once() {
        let mut page = FakePage::default();
        let mut loader = BannerLoader::mount(example_config(), &mut page);

        loader.render(example_config(), &page);
        loader.render(other_config(), &page);
        loader.notify(&page);

        assert_eq!(page.scripts, vec![ScriptTag::privacy_banner()]);
    }

    #[test]
    fn test_initializer_present_at_mount() {
        let mut page = FakePage::with_banner();
        let mut loader = BannerLoader::mount(example_config(), &mut page);

        assert_eq!(loader.state(), LoadState::Initialized);
        assert_eq!(page.calls(), vec![example_config()]);

        // Same config, then a different one: no further calls
        assert_eq!(
            loader.render(example_config(), &page),
            LoadState::Initialized
        );
        loader.render(other_config(), &page);
        assert_eq!(page.calls(), vec![example_config()]);
    }

    #[test]
    fn test_initializer_never_defined() {
        let mut page = FakePage::default();
        let mut loader = BannerLoader::mount(example_config(), &mut page);

        for _ in 0..5 {
            assert_eq!(
                loader.render(example_config(), &page),
                LoadState::NotInitialized
            );
        }
        assert_eq!(loader.notify(&page), LoadState::NotInitialized);

        assert!(!loader.is_initialized());
        assert!(page.calls().is_empty());
    }

    #[test]
    fn test_initializer_appears_after_renders() {
        let mut page = FakePage::default();
        let mut loader = BannerLoader::mount(example_config(), &mut page);

        loader.render(example_config(), &page);
        loader.render(example_config(), &page);
        assert!(page.calls().is_empty());

        // Script finished loading; the config of this render is the one sent
        page.banner_defined = true;
        assert_eq!(
            loader.render(other_config(), &page),
            LoadState::Initialized
        );
        assert_eq!(page.calls(), vec![other_config()]);

        loader.render(example_config(), &page);
        assert_eq!(page.calls(), vec![other_config()]);
    }

    #[test]
    fn test_notify_uses_current_config() {
        let mut page = FakePage::default();
        let mut loader = BannerLoader::mount(example_config(), &mut page);
        loader.render(other_config(), &page);

        page.banner_defined = true;
        assert_eq!(loader.notify(&page), LoadState::Initialized);
        assert_eq!(loader.notify(&page), LoadState::Initialized);

        assert_eq!(page.calls(), vec![other_config()]);
    }

    #[test]
    fn test_config_change_after_initialization_is_ignored() {
        let mut page = FakePage::with_banner();
        let mut loader = BannerLoader::mount(example_config(), &mut page);

        loader.render(other_config(), &page);

        assert_eq!(loader.config(), &other_config());
        assert_eq!(page.calls(), vec![example_config()]);
    }

    #[test]
    fn test_remount_allows_one_more_call() {
        let mut page = FakePage::with_banner();

        let loader = BannerLoader::mount(example_config(), &mut page);
        assert!(loader.is_initialized());
        drop(loader);

        let mut loader = BannerLoader::mount(example_config(), &mut page);
        loader.render(example_config(), &page);

        assert_eq!(page.calls().len(), 2);
        assert_eq!(page.scripts.len(), 2);
    }

    #[test]
    fn test_loaders_do_not_share_state() {
        let mut first_page = FakePage::with_banner();
        let mut second_page = FakePage::default();

        let first = BannerLoader::mount(example_config(), &mut first_page);
        let second = BannerLoader::mount(example_config(), &mut second_page);

        assert!(first.is_initialized());
        assert!(!second.is_initialized());
    }

    #[test]
    fn test_default_state_is_not_initialized() {
        assert_eq!(LoadState::default(), LoadState::NotInitialized);
    }
}
