// Season standings route

use axum::extract::State;
use axum::response::Json;

use courtside_lib::models::SeasonStats;
use courtside_lib::services::stats::season_stats;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<SeasonStats>> {
    let events = state.event_repo().list()?;
    Ok(Json(season_stats(&events)))
}
