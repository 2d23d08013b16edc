//! Decides whether a principal may touch a project or file.
//!
//! Files carry no owner of their own: a file is always resolved through its
//! parent project, and the project's `owner_id` is compared with the caller.

use uuid::Uuid;

use crate::database::models::{File, Project};
use crate::database::Database;

/// Outcome of an ownership check. `Permitted` carries the rows that were
/// loaded to make the decision so callers don't fetch them twice.
#[derive(Debug, Clone)]
pub enum Access<T> {
    Permitted(T),
    NotFound,
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("resource not found")]
    NotFound,
    #[error("resource belongs to another user")]
    Forbidden,
}

impl<T> Access<T> {
    pub fn into_result(self) -> Result<T, AccessError> {
        match self {
            Access::Permitted(value) => Ok(value),
            Access::NotFound => Err(AccessError::NotFound),
            Access::Forbidden => Err(AccessError::Forbidden),
        }
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, Access::Permitted(_))
    }
}

/// Row lookups the resolver needs.
#[async_trait::async_trait]
pub trait ResourceLookup: Send + Sync {
    async fn project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error>;
    async fn file(&self, file_id: Uuid) -> Result<Option<File>, sqlx::Error>;
}

#[async_trait::async_trait]
impl ResourceLookup for Database {
    async fn project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        Project::get(project_id, self).await
    }

    async fn file(&self, file_id: Uuid) -> Result<Option<File>, sqlx::Error> {
        File::get(file_id, self).await
    }
}

pub async fn resolve_project<L>(
    lookup: &L,
    principal: Uuid,
    project_id: Uuid,
) -> Result<Access<Project>, sqlx::Error>
where
    L: ResourceLookup + ?Sized,
{
    let Some(project) = lookup.project(project_id).await? else {
        return Ok(Access::NotFound);
    };
    if project.owner_id != principal {
        tracing::warn!(%principal, %project_id, "refusing access to project of another user");
        return Ok(Access::Forbidden);
    }
    Ok(Access::Permitted(project))
}

pub async fn resolve_file<L>(
    lookup: &L,
    principal: Uuid,
    file_id: Uuid,
) -> Result<Access<(File, Project)>, sqlx::Error>
where
    L: ResourceLookup + ?Sized,
{
    let Some(file) = lookup.file(file_id).await? else {
        return Ok(Access::NotFound);
    };
    let access = match resolve_project(lookup, principal, *file.project_id).await? {
        Access::Permitted(project) => Access::Permitted((file, project)),
        Access::NotFound => Access::NotFound,
        Access::Forbidden => Access::Forbidden,
    };
    Ok(access)
}
