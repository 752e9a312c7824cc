// Admin session handling
// Login issues an opaque token kept server-side and handed to the browser
// in an HttpOnly cookie; mutating handlers check it before doing anything.

use std::collections::HashSet;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "courtside_session";

/// Session lifetime in seconds (24 hours)
const SESSION_MAX_AGE: u32 = 24 * 60 * 60;

/// In-memory store of active admin session tokens
pub struct SessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashSet::new()),
        }
    }

    /// Mint and register a new session token
    pub async fn create(&self) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.tokens.write().await.insert(token.clone());
        token
    }

    pub async fn remove(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }
}

/// Extract the session token from the Cookie header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Reject the request unless it carries a valid admin session
pub async fn require_admin(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    match session_token(headers) {
        Some(token) if state.sessions.contains(&token).await => Ok(()),
        _ => Err(ApiError::unauthorized()),
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.password != state.config.admin_password {
        return Err(ApiError::unauthorized());
    }

    let token = state.sessions.create().await;
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE, token, SESSION_MAX_AGE
    );

    log::info!("[auth] Admin logged in");
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    ))
}

/// POST /api/admin/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(&token).await;
    }

    let cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0", SESSION_COOKIE);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    ))
}

/// GET /api/admin/check
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    let is_admin = match session_token(&headers) {
        Some(token) => state.sessions.contains(&token).await,
        None => false,
    };
    Json(json!({ "isAdmin": is_admin }))
}
