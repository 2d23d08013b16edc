use axum::routing::{delete, get};
use axum::Router;

pub mod create;
pub mod create_file;
pub mod delete;
pub mod list;
pub mod list_files;

pub use create::{CreateProjectRequest, ProjectInfo};
pub use create_file::{CreateFileBody, CreateFileRequest};
pub use delete::{DeleteProjectRequest, DeleteProjectResponse};
pub use list::ListProjectsRequest;
pub use list_files::ListFilesRequest;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route("/:project_id", delete(delete::handler))
        .route(
            "/:project_id/files",
            get(list_files::handler).post(create_file::handler),
        )
        .with_state(state)
}
