// HTTP request handlers

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::AppState;
use crate::api::endpoints::Platform;
use crate::coaching::{CoachingService, PROMPT_REQUIRED};
use crate::error::AppError;
use crate::lookup::{LookupRequest, ProfileLookup, ProfileReport};

const FETCH_FAILED: &str = "Failed to fetch data";
const COACHING_FAILED: &str = "Failed to generate coaching advice";
const NAME_AND_TAG_REQUIRED: &str = "Game name and tag line are required";
const METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/summoner", get(handle_summoner).fallback(method_not_allowed))
        .route("/api/coaching", post(handle_coaching).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerQuery {
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CoachingRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CoachingResponse {
    pub advice: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unknown region codes fall back to the configured platform.
fn resolve_platform(code: Option<String>, default: Platform) -> Platform {
    let Some(code) = non_blank(code) else {
        return default;
    };
    Platform::from_code(&code).unwrap_or_else(|| {
        tracing::warn!(region = %code, fallback = %default, "Unknown region code");
        default
    })
}

/// GET /api/summoner?gameName=&tagLine=&region=
async fn handle_summoner(
    State(state): State<AppState>,
    Query(query): Query<SummonerQuery>,
) -> Result<Json<ProfileReport>, ApiError> {
    let (game_name, tag_line) = match (non_blank(query.game_name), non_blank(query.tag_line)) {
        (Some(game_name), Some(tag_line)) => (game_name, tag_line),
        _ => return Err(ApiError::bad_request(NAME_AND_TAG_REQUIRED)),
    };
    let region = resolve_platform(query.region, state.config.region);
    let request = LookupRequest {
        game_name,
        tag_line,
        region,
    };

    let provider = Arc::clone(&state.game_data);
    let policy = state.batch_policy;
    let report = tokio::task::spawn_blocking(move || {
        ProfileLookup::new(provider.as_ref())
            .with_policy(policy)
            .run(&request)
    })
    .await
    .map_err(|e| ApiError::internal(FETCH_FAILED, e.to_string()))?
    .map_err(|e| ApiError::from_app(FETCH_FAILED, e))?;

    Ok(Json(report))
}

/// POST /api/coaching with `{"prompt": "..."}`
async fn handle_coaching(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CoachingResponse>, ApiError> {
    // An unreadable body is treated the same as a missing prompt.
    let prompt = serde_json::from_slice::<CoachingRequest>(&body)
        .ok()
        .and_then(|request| request.prompt);
    if non_blank(prompt.clone()).is_none() {
        return Err(ApiError::bad_request(PROMPT_REQUIRED));
    }

    let generator = Arc::clone(&state.text_generator);
    let advice = tokio::task::spawn_blocking(move || {
        CoachingService::new(generator.as_ref()).advise(prompt.as_deref())
    })
    .await
    .map_err(|e| ApiError::internal(COACHING_FAILED, e.to_string()))?
    .map_err(|e| ApiError::from_app(COACHING_FAILED, e))?;

    Ok(Json(CoachingResponse { advice }))
}

async fn method_not_allowed() -> ApiError {
    ApiError {
        status: StatusCode::METHOD_NOT_ALLOWED,
        error: METHOD_NOT_ALLOWED.to_string(),
        details: None,
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Error response rendered as `{"error": ..., "details": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: message.to_string(),
            details: None,
        }
    }

    pub fn internal(label: &str, details: String) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: label.to_string(),
            details: Some(details),
        }
    }

    /// `label` names the failed operation for errors that aren't the caller's fault.
    pub fn from_app(label: &str, err: AppError) -> Self {
        match err {
            AppError::InvalidRequest(message) => ApiError::bad_request(&message),
            AppError::PlayerNotFound(details) => ApiError {
                status: StatusCode::NOT_FOUND,
                error: "Player not found".to_string(),
                details: Some(details),
            },
            AppError::ConfigError(details) => {
                ApiError::internal("Server configuration error", details)
            }
            other => ApiError::internal(label, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                error = %self.error,
                details = ?self.details,
                "Request failed"
            );
        } else {
            tracing::warn!(
                status = %self.status,
                error = %self.error,
                details = ?self.details,
                "Request rejected"
            );
        }

        let mut body = serde_json::json!({ "error": self.error });
        if let Some(details) = self.details {
            body["details"] = serde_json::Value::String(details);
        }

        (self.status, Json(body)).into_response()
    }
}
