use axum::routing::post;
use axum::Router;

pub mod login;
pub mod register;

pub use login::{LoginRequest, LoginResponse};
pub use register::{RegisterRequest, RegisterResponse};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register::handler))
        .route("/login", post(login::handler))
        .with_state(state)
}
