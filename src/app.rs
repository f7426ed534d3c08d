use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/template/next", post(handlers::cycle_template))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/display", get(handlers::get_display))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/calendar", post(handlers::put_calendar))
        .route("/api/template", post(handlers::set_template))
        .with_state(state)
}
