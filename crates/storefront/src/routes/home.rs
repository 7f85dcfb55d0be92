//! Home page route handler.
//!
//! The home page is the privacy banner demo: it mounts the banner and tells
//! visitors how to force it to show.

use askama::Template;
use axum::{extract::State, http::Uri, response::Html};
use tracing::instrument;

use crate::banner::BannerView;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub banner: BannerView,
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the template fails to render.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn home(State(state): State<AppState>, uri: Uri) -> Result<Html<String>> {
    let banner = BannerView::mount(state.banner().clone(), &uri);

    if banner.preview {
        tracing::info!("Privacy banner preview requested");
    }

    Ok(Html(HomeTemplate { banner }.render()?))
}
