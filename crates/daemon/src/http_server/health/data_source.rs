use std::fmt::Debug;
use std::ops::Deref;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use http::request::Parts;

use crate::database::Database;

/// Something the API depends on to serve requests.
#[async_trait]
pub trait DataSource {
    async fn is_ready(&self) -> Result<(), DataSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("database is not reachable")]
    Unreachable,

    #[error("database schema has not been migrated")]
    SchemaMissing,
}

pub type DynDataSource = Arc<dyn DataSource + Send + Sync>;

/// Readiness probe target, extracted from router state.
pub struct StateDataSource(DynDataSource);

impl Debug for StateDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDataSource").finish()
    }
}

impl StateDataSource {
    #[cfg(test)]
    pub fn new(dds: DynDataSource) -> Self {
        Self(dds)
    }
}

impl Deref for StateDataSource {
    type Target = DynDataSource;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

struct DbSource {
    db: Database,
}

#[async_trait]
impl DataSource for DbSource {
    async fn is_ready(&self) -> Result<(), DataSourceError> {
        if let Err(err) = sqlx::query("SELECT 1").fetch_one(&*self.db).await {
            tracing::error!(error = %err, "database readiness check failed");
            return Err(DataSourceError::Unreachable);
        }

        // the accounts table is created by the first migration
        sqlx::query("SELECT 1 FROM users LIMIT 1")
            .fetch_optional(&*self.db)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "database schema check failed");
                DataSourceError::SchemaMissing
            })?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for StateDataSource
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ();

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(StateDataSource(Arc::new(DbSource {
            db: Database::from_ref(state),
        })))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    #[derive(Clone)]
    pub(crate) enum MockReadiness {
        Ready,
        Unreachable,
        SchemaMissing,
    }

    #[async_trait]
    impl DataSource for MockReadiness {
        async fn is_ready(&self) -> Result<(), DataSourceError> {
            match self {
                MockReadiness::Ready => Ok(()),
                MockReadiness::Unreachable => Err(DataSourceError::Unreachable),
                MockReadiness::SchemaMissing => Err(DataSourceError::SchemaMissing),
            }
        }
    }

    #[tokio::test]
    async fn test_db_source_ready() {
        let db = crate::database::test_support::memory_db().await;
        let source = DbSource { db };
        assert!(source.is_ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_db_source_closed_pool() {
        let db = crate::database::test_support::memory_db().await;
        db.close().await;
        let source = DbSource { db };
        assert!(matches!(
            source.is_ready().await,
            Err(DataSourceError::Unreachable)
        ));
    }

    #[tokio::test]
    async fn test_db_source_unmigrated() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let source = DbSource {
            db: Database::new(pool),
        };
        assert!(matches!(
            source.is_ready().await,
            Err(DataSourceError::SchemaMissing)
        ));
    }
}
