//! Web UI Module
//!
//! The HTML surface: registration and login pages, the vendor dashboard,
//! and the public menu views.

mod routes;
mod templates;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Create the web UI router.
pub fn router() -> Router<Arc<AppState>> {
    routes::create_router()
}
