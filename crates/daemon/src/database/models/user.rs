use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;

/// An account. `password_hash` is a PHC string and never leaves the daemon.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: DUuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Insert a new account. Duplicate usernames or emails surface as a
    /// unique violation, see [`crate::database::unique_violation`].
    pub async fn create(
        username: &str,
        email: &str,
        password_hash: &str,
        db: &Database,
    ) -> Result<User, sqlx::Error> {
        let user_id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(*user_id, db)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn get(user_id: Uuid, db: &Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, created_at
            FROM users
            WHERE user_id = ?1
            "#,
        )
        .bind(DUuid::from(user_id))
        .fetch_optional(&**db)
        .await
    }

    pub async fn by_email(email: &str, db: &Database) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, email, password_hash, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&**db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_db;
    use crate::database::unique_violation;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = memory_db().await;
        let user = User::create("ada", "ada@example.com", "$argon2id$fake", &db)
            .await
            .unwrap();

        let by_id = User::get(*user.user_id, &db).await.unwrap().unwrap();
        assert_eq!(by_id.username, "ada");

        let by_email = User::by_email("ada@example.com", &db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.user_id, user.user_id);

        assert!(User::by_email("nobody@example.com", &db)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicates_name_the_column() {
        let db = memory_db().await;
        User::create("ada", "ada@example.com", "h", &db).await.unwrap();

        let err = User::create("other", "ada@example.com", "h", &db)
            .await
            .unwrap_err();
        assert_eq!(unique_violation(&err).as_deref(), Some("users.email"));

        let err = User::create("ada", "other@example.com", "h", &db)
            .await
            .unwrap_err();
        assert_eq!(unique_violation(&err).as_deref(), Some("users.username"));
    }
}
