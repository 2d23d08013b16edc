use axum::routing::get;
use axum::Router;

pub mod delete;
pub mod get;
pub mod update;

pub use delete::{DeleteFileRequest, DeleteFileResponse};
pub use get::{FileDetail, FileInfo, GetFileRequest};
pub use update::{UpdateFileRequest, UpdateFileResponse};

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/:file_id",
            get(get::handler)
                .put(update::handler)
                .delete(delete::handler),
        )
        .with_state(state)
}
