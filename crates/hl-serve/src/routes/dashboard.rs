use axum::response::Html;
use axum::routing::get;
use axum::Router;

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
