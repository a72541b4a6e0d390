use axum::http::StatusCode;
use axum::Json;
use hl_core::HooklogError;
use serde::Serialize;
use utoipa::ToSchema;

pub const DATABASE_NOT_AVAILABLE: &str = "Database not available";

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub fn map_error(
    err: &HooklogError,
    correlation_id: Option<&str>,
) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!(%err, correlation_id, "request failed");
    let message = match err {
        HooklogError::StoreUnavailable { .. } => DATABASE_NOT_AVAILABLE.to_string(),
        HooklogError::Store { message } => message.clone(),
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
}
