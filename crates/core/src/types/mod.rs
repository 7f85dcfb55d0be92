//! Core types for the privacy banner.

pub mod banner;
pub mod script;

pub use banner::BannerConfig;
pub use script::{
    PREVIEW_QUERY_PARAM, PRIVACY_BANNER_ORIGIN, PRIVACY_BANNER_SCRIPT_ID,
    PRIVACY_BANNER_SCRIPT_URL, ScriptTag,
};
