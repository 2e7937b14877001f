//! Dashboard handlers: menu listing, upload, and deletion.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::EntityTrait;
use std::sync::Arc;
use tera::Context;

use super::utils::{
    add_flash_to_context, current_vendor, flash, public_base, render_not_found, render_template,
    require_vendor, FlashQuery,
};
use crate::db::entities::Vendor;
use crate::error::AppError;
use crate::state::AppState;
use crate::{links, menus};

/// Landing page: dashboard when logged in, registration otherwise.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Redirect {
    if current_vendor(&state, &headers).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/register")
    }
}

/// One menu row for the dashboard template
#[derive(serde::Serialize)]
struct MenuInfo {
    id: i32,
    image_filename: String,
    slug: String,
    public_url: String,
}

/// Dashboard (GET)
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<FlashQuery>,
) -> Result<Response, AppError> {
    let vendor_id = require_vendor(&state, &headers)?;

    // The session can outlive the account row
    let vendor = Vendor::find_by_id(vendor_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let menus = menus::list_for_vendor(&state.db, vendor_id).await?;

    let base = public_base(&state, &headers);
    let menu_infos: Vec<MenuInfo> = menus
        .iter()
        .map(|m| MenuInfo {
            id: m.id,
            image_filename: m.image_filename.clone(),
            slug: m.slug.clone(),
            public_url: links::menu_url(&base, &m.slug),
        })
        .collect();

    let mut context = Context::new();
    context.insert("logged_in", &true);
    context.insert("restaurant_name", &vendor.restaurant_name);
    context.insert("menus", &menu_infos);
    add_flash_to_context(&mut context, &query);
    Ok(render_template("dashboard.html", &context))
}

/// Menu upload (POST, multipart)
pub async fn upload_menu(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let vendor_id = require_vendor(&state, &headers)?;

    let mut file_name: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    file_name = field.file_name().map(|s| s.to_string());
                    match field.bytes().await {
                        Ok(bytes) => file_data = Some(bytes.to_vec()),
                        Err(e) => {
                            tracing::warn!("failed to read upload body: {e}");
                            return Ok(Redirect::to(
                                "/dashboard?error=Upload+failed.+Please+try+again.",
                            )
                            .into_response());
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("malformed multipart request: {e}");
                return Ok(
                    Redirect::to("/dashboard?error=Upload+failed.+Please+try+again.")
                        .into_response(),
                );
            }
        }
    }

    let (Some(name), Some(data)) = (file_name, file_data) else {
        return Ok(Redirect::to("/dashboard?error=No+file+selected.").into_response());
    };

    let stored = match state.uploads.store(&name, &data).await {
        Ok(stored) => stored,
        Err(AppError::InvalidUpload(reason)) => {
            return Ok(
                Redirect::to(&format!("/dashboard?error={}", flash(&reason))).into_response(),
            );
        }
        Err(e) => return Err(e),
    };

    let slug = links::mint_slug();
    menus::create(&state.db, vendor_id, &stored, &slug).await?;

    tracing::info!("vendor {vendor_id} uploaded menu {stored} with slug {slug}");
    Ok(Redirect::to("/dashboard?message=Menu+uploaded+successfully.").into_response())
}

/// Menu deletion (POST). Owner-only; the backing file is removed
/// best-effort, the row is deleted regardless.
pub async fn delete_menu(
    State(state): State<Arc<AppState>>,
    Path(menu_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let vendor_id = require_vendor(&state, &headers)?;

    let menu = match menus::find_owned(&state.db, menu_id, vendor_id).await {
        Ok(menu) => menu,
        Err(AppError::NotFound) => return Ok(render_not_found("Menu not found")),
        Err(AppError::Unauthorized) => {
            return Ok(Redirect::to(
                "/dashboard?error=You+do+not+have+permission+to+delete+this+menu.",
            )
            .into_response());
        }
        Err(e) => return Err(e),
    };

    let mut file_removed = true;
    if let Err(e) = state.uploads.remove(&menu.image_filename).await {
        tracing::warn!("could not delete file {}: {e}", menu.image_filename);
        file_removed = false;
    }

    menus::delete(&state.db, menu).await?;

    if file_removed {
        Ok(Redirect::to("/dashboard?message=Menu+deleted+successfully.").into_response())
    } else {
        Ok(Redirect::to(
            "/dashboard?error=Menu+deleted,+but+its+image+file+could+not+be+removed.",
        )
        .into_response())
    }
}
