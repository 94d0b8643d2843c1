use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/meta", get(handlers::get_meta))
        .route("/api/today", get(handlers::get_today))
        .route("/api/series", get(handlers::get_series))
        .route("/api/checkin", post(handlers::checkin))
        .route("/api/report", post(handlers::report))
        .route("/api/share", get(handlers::share))
        .with_state(state)
}
