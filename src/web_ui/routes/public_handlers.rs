//! Public handlers: menu pages, stored images, QR codes, and the health probe.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tera::Context;

use super::utils::{add_auth_to_context, public_base, render_not_found, render_template};
use crate::error::AppError;
use crate::state::AppState;
use crate::{links, menus, qr, uploads};

/// Public menu page (GET)
pub async fn view_menu(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(menu) = menus::find_by_slug(&state.db, &slug).await? else {
        return Ok(render_not_found("Menu not found"));
    };

    let mut context = Context::new();
    add_auth_to_context(&mut context, &state, &headers);
    context.insert("image_filename", &menu.image_filename);
    context.insert("slug", &menu.slug);
    Ok(render_template("menu.html", &context))
}

/// Serve a stored menu image (GET)
pub async fn uploaded_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    match state.uploads.read(&filename).await {
        Ok(data) => Ok((
            [(header::CONTENT_TYPE, uploads::content_type(&filename))],
            data,
        )
            .into_response()),
        Err(AppError::NotFound) => Ok((StatusCode::NOT_FOUND, "File not found").into_response()),
        Err(e) => Err(e),
    }
}

/// QR code PNG for a menu's public link (GET)
pub async fn qr_code(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if menus::find_by_slug(&state.db, &slug).await?.is_none() {
        return Ok((StatusCode::NOT_FOUND, "Menu not found").into_response());
    }

    let base = public_base(&state, &headers);
    let url = links::menu_url(&base, &slug);
    let png = qr::render_png(&url)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Liveness probe (GET)
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
