// Backup and restore routes
// The archive routes are thin shells around the backup engine: all
// validation ordering and partial-failure semantics live in the library.

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use courtside_lib::services::backup::{
    ArchiveBuilder, RestoreOrchestrator, Snapshot,
};

use crate::auth::require_admin;
use crate::error::{ApiError, ApiResult};
use crate::forms::FormData;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestoreResponse {
    success: bool,
    message: String,
    files_restored: u32,
}

/// GET /api/admin/backup
/// Legacy snapshot-only transfer: just the JSON document, no assets
pub async fn export_snapshot(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Snapshot>> {
    require_admin(&state, &headers).await?;

    let _shared = state.backup_gate.read().await;
    Ok(Json(Snapshot::capture(&state.db)?))
}

/// POST /api/admin/restore
/// Legacy restore: `{ "backup": <snapshot> }`, relational replace only
pub async fn restore_snapshot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut body): Json<serde_json::Value>,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers).await?;

    let backup = body
        .get_mut("backup")
        .map(serde_json::Value::take)
        .ok_or_else(|| ApiError::bad_request("Missing backup data"))?;
    let snapshot = Snapshot::from_value(backup)?;

    let _exclusive = state.backup_gate.write().await;
    RestoreOrchestrator::new(state.db.clone(), state.assets.clone())
        .restore_snapshot(snapshot)?;

    Ok(Json(json!({ "success": true })))
}

/// GET /api/admin/backup/full
/// Streams a ZIP of the snapshot plus every logo asset
pub async fn export_archive(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    require_admin(&state, &headers).await?;

    let _shared = state.backup_gate.read().await;

    let snapshot = Snapshot::capture(&state.db)?;
    let filename = format!(
        "courtside-backup-{}.zip",
        snapshot.generated_at.replace([':', '.'], "-")
    );

    let bytes = ArchiveBuilder::new(&state.assets).build_to_vec(&snapshot)?;
    log::info!("[backup] Exported archive {} ({} bytes)", filename, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    ))
}

/// POST /api/admin/restore/full
/// Multipart field `backup` holds the uploaded archive
pub async fn restore_archive(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<RestoreResponse>> {
    require_admin(&state, &headers).await?;

    let form = FormData::read(multipart, "backup").await?;
    let upload = form
        .file
        .ok_or_else(|| ApiError::bad_request("No backup file provided"))?;

    log::info!(
        "[restore] Received {} ({} bytes)",
        upload.original_name,
        upload.bytes.len()
    );

    let _exclusive = state.backup_gate.write().await;
    let summary = RestoreOrchestrator::new(state.db.clone(), state.assets.clone())
        .restore_archive(upload.bytes)?;

    Ok(Json(RestoreResponse {
        success: true,
        message: format!(
            "Full backup restored successfully ({} of {} asset files)",
            summary.files_restored, summary.files_in_archive
        ),
        files_restored: summary.files_restored,
    }))
}
