pub mod api;
pub mod healthz;

use crate::appstate::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(healthz::router())
        .nest("/api", api::router())
}
