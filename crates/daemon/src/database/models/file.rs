use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;

/// A file row including its content.
#[derive(Debug, Clone, FromRow)]
pub struct File {
    pub file_id: DUuid,
    pub project_id: DUuid,
    pub name: String,
    pub path: String,
    pub file_type: Option<String>,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A file row without its content, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct FileMeta {
    pub file_id: DUuid,
    pub project_id: DUuid,
    pub name: String,
    pub path: String,
    pub file_type: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<File> for FileMeta {
    fn from(file: File) -> Self {
        Self {
            file_id: file.file_id,
            project_id: file.project_id,
            name: file.name,
            path: file.path,
            file_type: file.file_type,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

impl File {
    /// Insert an empty file and bump its project's `updated_at`, both in one
    /// transaction.
    pub async fn create(
        project_id: Uuid,
        name: &str,
        path: &str,
        file_type: Option<&str>,
        db: &Database,
    ) -> Result<File, sqlx::Error> {
        let file_id = DUuid::new();
        let project_id = DUuid::from(project_id);
        let now = OffsetDateTime::now_utc();
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO files (
                file_id, project_id, name, path, file_type, content,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, '', ?6, ?6)
            "#,
        )
        .bind(file_id)
        .bind(project_id)
        .bind(name)
        .bind(path)
        .bind(file_type)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let touched = sqlx::query("UPDATE projects SET updated_at = ?1 WHERE project_id = ?2")
            .bind(now)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        if touched.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        let file = sqlx::query_as::<_, File>(
            r#"
            SELECT
                file_id, project_id, name, path, file_type, content,
                created_at, updated_at
            FROM files
            WHERE file_id = ?1
            "#,
        )
        .bind(file_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(file)
    }

    pub async fn get(file_id: Uuid, db: &Database) -> Result<Option<File>, sqlx::Error> {
        sqlx::query_as::<_, File>(
            r#"
            SELECT
                file_id, project_id, name, path, file_type, content,
                created_at, updated_at
            FROM files
            WHERE file_id = ?1
            "#,
        )
        .bind(DUuid::from(file_id))
        .fetch_optional(&**db)
        .await
    }

    /// Metadata of every file in a project, by name.
    pub async fn list_by_project(
        project_id: Uuid,
        db: &Database,
    ) -> Result<Vec<FileMeta>, sqlx::Error> {
        sqlx::query_as::<_, FileMeta>(
            r#"
            SELECT
                file_id, project_id, name, path, file_type,
                created_at, updated_at
            FROM files
            WHERE project_id = ?1
            ORDER BY name ASC, created_at ASC
            "#,
        )
        .bind(DUuid::from(project_id))
        .fetch_all(&**db)
        .await
    }

    /// Replace the content wholesale. Returns the updated row, `None` if the
    /// file is gone.
    pub async fn update_content(
        file_id: Uuid,
        content: &str,
        db: &Database,
    ) -> Result<Option<File>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE files
            SET content = ?1, updated_at = ?2
            WHERE file_id = ?3
            "#,
        )
        .bind(content)
        .bind(OffsetDateTime::now_utc())
        .bind(DUuid::from(file_id))
        .execute(&**db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::get(file_id, db).await
    }

    pub async fn delete(file_id: Uuid, db: &Database) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM files WHERE file_id = ?1")
            .bind(DUuid::from(file_id))
            .execute(&**db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
