//! Project and file operations on behalf of an authenticated principal.
//!
//! Every operation that names an existing project or file runs the
//! ownership check first and only touches the store once access is
//! permitted.

use uuid::Uuid;

use common::prelude::Language;

use super::ownership::{resolve_file, resolve_project, AccessError};
use crate::database::models::{File, FileMeta, Project};
use crate::database::Database;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("{0}")]
    Validation(String),
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AccessError> for ResourceError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound => ResourceError::NotFound,
            AccessError::Forbidden => ResourceError::Forbidden,
        }
    }
}

/// Fields accepted when creating a file.
#[derive(Debug, Clone, Default)]
pub struct NewFile {
    pub name: String,
    pub file_type: Option<String>,
    pub path: Option<String>,
}

impl NewFile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
    db: &'a Database,
}

impl<'a> Resources<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_project(&self, owner: Uuid, name: &str) -> Result<Project, ResourceError> {
        let name = required(name, "Project name is required.")?;
        let project = Project::create(owner, name, self.db).await?;
        tracing::info!(project_id = %project.project_id, "project created");
        Ok(project)
    }

    pub async fn list_projects(&self, owner: Uuid) -> Result<Vec<Project>, ResourceError> {
        Ok(Project::list_by_owner(owner, self.db).await?)
    }

    /// Delete a project and every file in it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_project(
        &self,
        owner: Uuid,
        project_id: Uuid,
    ) -> Result<Project, ResourceError> {
        let project = resolve_project(self.db, owner, project_id)
            .await?
            .into_result()?;
        if !Project::delete_with_files(project_id, self.db).await? {
            return Err(ResourceError::NotFound);
        }
        tracing::info!("project deleted");
        Ok(project)
    }

    #[tracing::instrument(skip(self, new_file), fields(name = %new_file.name))]
    pub async fn create_file(
        &self,
        owner: Uuid,
        project_id: Uuid,
        new_file: NewFile,
    ) -> Result<File, ResourceError> {
        resolve_project(self.db, owner, project_id)
            .await?
            .into_result()?;

        let name = required(&new_file.name, "File name is required.")?;
        let file_type = match new_file.file_type.as_deref().map(str::trim) {
            Some(file_type) if !file_type.is_empty() => file_type.to_string(),
            _ => Language::from_file_name(name).to_string(),
        };
        let path = match new_file.path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => format!("/{}", name),
        };

        let file = File::create(project_id, name, &path, Some(&file_type), self.db).await?;
        tracing::info!(file_id = %file.file_id, "file created");
        Ok(file)
    }

    pub async fn list_files(
        &self,
        owner: Uuid,
        project_id: Uuid,
    ) -> Result<Vec<FileMeta>, ResourceError> {
        resolve_project(self.db, owner, project_id)
            .await?
            .into_result()?;
        Ok(File::list_by_project(project_id, self.db).await?)
    }

    pub async fn get_file(&self, owner: Uuid, file_id: Uuid) -> Result<File, ResourceError> {
        let (file, _) = resolve_file(self.db, owner, file_id).await?.into_result()?;
        Ok(file)
    }

    /// Replace a file's content. Writing the same content twice is a no-op
    /// apart from `updated_at`.
    #[tracing::instrument(skip(self, content), fields(len = content.len()))]
    pub async fn update_file_content(
        &self,
        owner: Uuid,
        file_id: Uuid,
        content: &str,
    ) -> Result<File, ResourceError> {
        resolve_file(self.db, owner, file_id).await?.into_result()?;
        File::update_content(file_id, content, self.db)
            .await?
            .ok_or(ResourceError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_file(&self, owner: Uuid, file_id: Uuid) -> Result<(), ResourceError> {
        resolve_file(self.db, owner, file_id).await?.into_result()?;
        if !File::delete(file_id, self.db).await? {
            return Err(ResourceError::NotFound);
        }
        Ok(())
    }
}

fn required<'s>(value: &'s str, message: &str) -> Result<&'s str, ResourceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ResourceError::Validation(message.to_string()));
    }
    Ok(trimmed)
}
