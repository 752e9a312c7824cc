// ICS schedule feed route

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use courtside_lib::services::calendar::schedule_calendar;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/calendar.ics
pub async fn calendar_feed(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let settings = state.settings_repo().get()?;
    let events = state.event_repo().list()?;

    let calendar = schedule_calendar(&settings, &events);

    Ok((
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        calendar.to_string(),
    ))
}
