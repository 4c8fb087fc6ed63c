use crate::models::AppState;
use axum::Router;

pub mod form_routes;
pub mod health_routes;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/forms", form_routes::router())
        .merge(health_routes::router())
        .with_state(state)
}
