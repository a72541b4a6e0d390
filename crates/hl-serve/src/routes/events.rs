use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{map_error, ErrorBody};
use crate::{build_hooklog, AppState};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use hl_core::types::EventFeed;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/events", get(list_events))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, body = EventFeed, description = "Latest 50 events, newest first"),
        (status = 500, body = ErrorBody)
    )
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let hooklog = match build_hooklog(&state) {
        Ok(hooklog) => hooklog,
        Err(err) => return map_error(&err, Some(&correlation.0)).into_response(),
    };
    match hooklog.events().feed() {
        Ok(feed) => Json(feed).into_response(),
        Err(err) => map_error(&err, Some(&correlation.0)).into_response(),
    }
}
