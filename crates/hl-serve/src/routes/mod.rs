pub mod dashboard;
pub mod error;
pub mod events;
pub mod webhook;

use crate::middleware::correlation::correlation_middleware;
use crate::{openapi, AppState};
use axum::middleware;
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(dashboard::router())
        .merge(webhook::router(state.clone()))
        .merge(events::router(state))
        .merge(openapi::router())
        .layer(middleware::from_fn(correlation_middleware))
}
