pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use hl_core::{Hooklog, HooklogError};
use hl_db::schema;
use hl_db::store::DbStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared handler state. The store is opened per request from `db_path`, so a
/// missing or locked database surfaces as a per-request error.
#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
}

impl AppState {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

pub fn open_store(state: &AppState) -> Result<DbStore, HooklogError> {
    let conn = schema::open_and_migrate(&state.db_path)
        .map_err(|err| HooklogError::unavailable(err.to_string()))?;
    Ok(DbStore::new(conn))
}

pub fn build_hooklog(state: &AppState) -> Result<Hooklog<DbStore>, HooklogError> {
    open_store(state).map(Hooklog::new)
}

pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, db_path = %state.db_path, "listening");
    axum::serve(listener, app(state)).await
}
