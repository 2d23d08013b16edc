use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;

#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub project_id: DUuid,
    pub owner_id: DUuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Project {
    pub async fn create(owner_id: Uuid, name: &str, db: &Database) -> Result<Project, sqlx::Error> {
        let project_id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO projects (project_id, owner_id, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(project_id)
        .bind(DUuid::from(owner_id))
        .bind(name)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(*project_id, db)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn get(project_id: Uuid, db: &Database) -> Result<Option<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT project_id, owner_id, name, created_at, updated_at
            FROM projects
            WHERE project_id = ?1
            "#,
        )
        .bind(DUuid::from(project_id))
        .fetch_optional(&**db)
        .await
    }

    /// Projects owned by `owner_id`, newest first.
    pub async fn list_by_owner(owner_id: Uuid, db: &Database) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT project_id, owner_id, name, created_at, updated_at
            FROM projects
            WHERE owner_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(DUuid::from(owner_id))
        .fetch_all(&**db)
        .await
    }

    /// Delete a project together with its files in one transaction.
    ///
    /// Returns whether the project existed.
    pub async fn delete_with_files(project_id: Uuid, db: &Database) -> Result<bool, sqlx::Error> {
        let project_id = DUuid::from(project_id);
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM files WHERE project_id = ?1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM projects WHERE project_id = ?1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
