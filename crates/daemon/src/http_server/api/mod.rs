use axum::Router;

pub mod ai;
pub mod auth;
pub mod client;
pub mod error;
pub mod extract;
pub mod files;
pub mod projects;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/auth", auth::router(state.clone()))
        .nest("/projects", projects::router(state.clone()))
        .nest("/files", files::router(state.clone()))
        .nest("/ai", ai::router(state.clone()))
        .with_state(state)
}
