pub mod api;
pub mod pages;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::router())
        .nest("/api", api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
