// Settings routes

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::json;

use courtside_lib::models::{SettingsUpdate, TeamSettings};

use crate::auth::require_admin;
use crate::error::ApiResult;
use crate::forms::FormData;
use crate::state::AppState;
use crate::uploads::store_logo;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<TeamSettings>> {
    Ok(Json(state.settings_repo().get()?))
}

/// PUT /api/settings
/// Multipart: homeTeamName, homeLocation, optional homeLogo file
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers).await?;

    let form = FormData::read(multipart, "homeLogo").await?;
    let home_logo = match &form.file {
        Some(file) => Some(store_logo(&state.assets, &file.original_name, &file.bytes)?),
        None => None,
    };

    state.settings_repo().update(&SettingsUpdate {
        home_team_name: form.text("homeTeamName"),
        home_location: form.text("homeLocation"),
        home_logo,
    })?;

    Ok(Json(json!({ "success": true })))
}
