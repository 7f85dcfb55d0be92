//! Privacy Banner Core - Shared types and the banner loader.
//!
//! This crate provides what the storefront needs to load Shopify's
//! privacy-consent banner:
//! - [`BannerConfig`] - the four values `loadBanner` is called with
//! - [`ScriptTag`] - a script element a host is asked to insert
//! - [`BannerLoader`] - requests the banner script once per mount and calls
//!   the banner's initializer once it becomes available
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! browser bindings. The page (or a test double) is a [`BannerHost`].
//!
//! # Modules
//!
//! - [`types`] - Configuration and script tag types
//! - [`loader`] - The check-once initialization sequence

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod loader;
pub mod types;

pub use loader::{BannerHost, BannerLoader, LoadState, PrivacyBanner};
pub use types::*;
