use axum::routing::post;
use axum::Router;

pub mod action;

pub use action::{ActionRequest, ActionResponse};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/action", post(action::handler))
        .with_state(state)
}
