//! Authentication route handlers for register, login, and logout.

use axum::{
    extract::{Form, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tera::Context;

use super::utils::{
    add_flash_to_context, current_vendor, render_template, session_token, FlashQuery,
};
use crate::error::AppError;
use crate::state::AppState;

/// Registration form data
#[derive(serde::Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub restaurant_name: String,
}

/// Login form data
#[derive(serde::Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration page (GET)
pub async fn register_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FlashQuery>,
) -> Response {
    if current_vendor(&state, &headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let mut context = Context::new();
    add_flash_to_context(&mut context, &query);
    render_template("register.html", &context)
}

/// Registration submit (POST)
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let username = form.username.trim();
    let restaurant_name = form.restaurant_name.trim();
    if username.is_empty() || form.password.is_empty() || restaurant_name.is_empty() {
        return Ok(Redirect::to("/register?error=All+fields+are+required.").into_response());
    }

    match state
        .auth
        .register(username, &form.password, restaurant_name)
        .await
    {
        Ok(_) => {
            Ok(Redirect::to("/login?message=Account+created.+You+can+now+log+in.").into_response())
        }
        Err(AppError::DuplicateUsername) => Ok(Redirect::to(
            "/register?error=Username+already+exists.+Please+choose+a+different+one.",
        )
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Login page (GET)
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FlashQuery>,
) -> Response {
    if current_vendor(&state, &headers).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let mut context = Context::new();
    add_flash_to_context(&mut context, &query);
    render_template("login.html", &context)
}

/// Login submit (POST)
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.login(form.username.trim(), &form.password).await {
        Ok(token) => Ok(Response::builder()
            .status(StatusCode::SEE_OTHER)
            .header("Location", "/dashboard")
            .header(
                "Set-Cookie",
                format!("session={token}; Path=/; HttpOnly; SameSite=Lax"),
            )
            .body(axum::body::Body::empty())
            .unwrap()),
        Err(AppError::InvalidCredentials) => {
            Ok(Redirect::to("/login?error=Invalid+username+or+password.").into_response())
        }
        Err(e) => Err(e),
    }
}

/// Logout (GET)
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.auth.logout(&token);
    }
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header("Location", "/login?message=You+have+been+logged+out.")
        .header(
            "Set-Cookie",
            "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        )
        .body(axum::body::Body::empty())
        .unwrap()
}
