// Event routes

use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::json;

use courtside_lib::models::{Event, EventInput};

use crate::auth::require_admin;
use crate::error::{ApiError, ApiResult};
use crate::forms::FormData;
use crate::state::AppState;
use crate::uploads::store_logo;

/// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<Vec<Event>>> {
    Ok(Json(state.event_repo().list()?))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Event>> {
    state
        .event_repo()
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Event not found"))
}

/// POST /api/events
/// Multipart event fields plus an optional opponentLogo file
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers).await?;

    let form = FormData::read(multipart, "opponentLogo").await?;
    let opponent_logo = match &form.file {
        Some(file) => Some(store_logo(&state.assets, &file.original_name, &file.bytes)?),
        None => None,
    };

    let input = event_input(&form, opponent_logo)?;
    let id = state.event_repo().create(&input)?;

    Ok(Json(json!({ "success": true, "id": id })))
}

/// PUT /api/events/{id}
/// A new upload replaces the logo; otherwise the existingLogo field keeps it
pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers).await?;

    let form = FormData::read(multipart, "opponentLogo").await?;
    let opponent_logo = match &form.file {
        Some(file) => Some(store_logo(&state.assets, &file.original_name, &file.bytes)?),
        None => form.text("existingLogo"),
    };

    let input = event_input(&form, opponent_logo)?;
    if !state.event_repo().update(id, &input)? {
        return Err(ApiError::not_found("Event not found"));
    }

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers).await?;

    if !state.event_repo().delete(id)? {
        return Err(ApiError::not_found("Event not found"));
    }

    Ok(Json(json!({ "success": true })))
}

fn event_input(form: &FormData, opponent_logo: Option<String>) -> ApiResult<EventInput> {
    Ok(EventInput {
        date: form.require("date")?,
        opponent_name: form.require("opponentName")?,
        opponent_logo,
        is_home: form.flag("isHome"),
        location: form.text("location"),
        time_7th: form.text("time7th"),
        time_8th: form.text("time8th"),
        score_7th_home: form.score("score7thHome"),
        score_7th_away: form.score("score7thAway"),
        score_8th_home: form.score("score8thHome"),
        score_8th_away: form.score("score8thAway"),
        notes: form.text("notes"),
        is_non_conference: form.flag("isNonConference"),
    })
}
