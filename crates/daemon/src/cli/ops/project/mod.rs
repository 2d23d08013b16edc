use clap::{Args, Subcommand};
use uuid::Uuid;

pub mod create;
pub mod ls;
pub mod rm;

use crate::cli::op::Op;
use quillmind_daemon::http_server::api::client::{ApiClient, ApiError};
use quillmind_daemon::http_server::api::projects::ListProjectsRequest;

crate::command_enum! {
    (Create, create::Create),
    (Ls, ls::Ls),
    (Rm, rm::Rm),
}

pub type ProjectCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Project {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[async_trait::async_trait]
impl Op for Project {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// Identifies a project by id or by name.
#[derive(Args, Debug, Clone)]
pub struct ProjectSelector {
    /// Project ID (or use --project)
    #[arg(long, group = "project_identifier")]
    pub project_id: Option<Uuid>,

    /// Project name (or use --project-id)
    #[arg(long = "project", group = "project_identifier")]
    pub project_name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SelectProjectError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Either --project-id or --project must be provided")]
    NoProjectIdentifier,
    #[error("Project not found: {0}")]
    NotFound(String),
}

impl ProjectSelector {
    /// Resolve to a project id, looking names up among the caller's projects.
    pub async fn resolve(&self, client: &ApiClient) -> Result<Uuid, SelectProjectError> {
        if let Some(id) = self.project_id {
            return Ok(id);
        }
        let name = self
            .project_name
            .as_deref()
            .ok_or(SelectProjectError::NoProjectIdentifier)?;

        client
            .call(ListProjectsRequest)
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.project_id)
            .ok_or_else(|| SelectProjectError::NotFound(name.to_string()))
    }
}
