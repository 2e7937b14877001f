//! Web route handlers.

mod auth_handlers;
mod dashboard_handlers;
mod public_handlers;
mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::AppState;

/// Create the router with all routes
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard_handlers::index))
        .route(
            "/register",
            get(auth_handlers::register_page).post(auth_handlers::register_submit),
        )
        .route(
            "/login",
            get(auth_handlers::login_page).post(auth_handlers::login_submit),
        )
        .route("/logout", get(auth_handlers::logout))
        .route("/dashboard", get(dashboard_handlers::dashboard))
        .route("/upload", post(dashboard_handlers::upload_menu))
        .route("/delete_menu/:id", post(dashboard_handlers::delete_menu))
        .route("/menu/:slug", get(public_handlers::view_menu))
        .route("/uploads/:filename", get(public_handlers::uploaded_file))
        .route("/qr/:slug", get(public_handlers::qr_code))
        .route("/health", get(public_handlers::health))
}
