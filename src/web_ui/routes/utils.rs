//! Shared helpers for the web route handlers.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tera::Context;

use crate::error::AppError;
use crate::state::AppState;
use crate::web_ui::templates;

/// Helper to render a template
pub fn render_template(name: &str, context: &Context) -> Response {
    match templates::render(name, context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
                .into_response()
        }
    }
}

/// Render the error page with the given status
pub fn render_error(status: StatusCode, message: &str) -> Response {
    let mut context = Context::new();
    context.insert("message", message);

    match templates::render("error.html", &context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(_) => (status, message.to_string()).into_response(),
    }
}

/// Render the error page as a 404
pub fn render_not_found(message: &str) -> Response {
    render_error(StatusCode::NOT_FOUND, message)
}

/// Pull the session token out of the Cookie header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        if let Some(token) = part.trim().strip_prefix("session=") {
            return Some(token.to_string());
        }
    }
    None
}

/// Resolve the logged-in vendor id from the request cookies.
pub fn current_vendor(state: &AppState, headers: &HeaderMap) -> Option<i32> {
    session_token(headers).and_then(|token| state.auth.vendor_id_for(&token))
}

/// Resolve the logged-in vendor id or fail as Unauthenticated.
pub fn require_vendor(state: &AppState, headers: &HeaderMap) -> Result<i32, AppError> {
    current_vendor(state, headers).ok_or(AppError::Unauthenticated)
}

/// Mark whether a vendor is logged in, for the nav links.
pub fn add_auth_to_context(context: &mut Context, state: &AppState, headers: &HeaderMap) {
    context.insert("logged_in", &current_vendor(state, headers).is_some());
}

/// Copy flash-style feedback from the query string into the context.
pub fn add_flash_to_context(context: &mut Context, query: &FlashQuery) {
    if let Some(error) = &query.error {
        context.insert("error", error);
    }
    if let Some(message) = &query.message {
        context.insert("message", message);
    }
}

/// Flash-style feedback carried across redirects in the query string.
#[derive(serde::Deserialize, Default)]
pub struct FlashQuery {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Encode a message for the flash query string.
pub fn flash(message: &str) -> String {
    message.replace(' ', "+")
}

/// Public origin for building shareable links: configured BASE_URL, or the
/// request's own host.
pub fn public_base(state: &AppState, headers: &HeaderMap) -> String {
    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    crate::links::public_base(state.config.base_url.as_deref(), host)
}
