use anyhow::Result;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::SqlitePoolOptions,
    Sqlite, SqlitePool,
};
use tracing::info;

use crate::config::DatabaseConfig;

/// DbConnection owns the SQLite pool and the schema it expects
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (creating if needed) the database described by `config`
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
            info!("Creating database at {}", config.url);
            Sqlite::create_database(&config.url).await?
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Initialize a private in-memory database for a single test
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        use sqlx::sqlite::SqliteConnectOptions;
        use std::str::FromStr;

        // Every parse of `sqlite::memory:` names a fresh shared-cache database.
        // One long-lived connection keeps it alive for the whole test.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps ids from being reused after a delete.
        // full_name_folded holds the Unicode-lowercased name for search.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS persons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                full_name_folded TEXT NOT NULL,
                phone TEXT NOT NULL,
                email TEXT,
                blog_url TEXT,
                notes TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let row = sqlx::query("SELECT COUNT(*) AS total FROM persons")
            .fetch_one(db.pool())
            .await
            .expect("persons table should exist");

        let total: i64 = row.get("total");
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_test_databases_are_isolated() {
        let first = DbConnection::init_test().await.expect("Failed to create test database");
        let second = DbConnection::init_test().await.expect("Failed to create test database");

        sqlx::query("INSERT INTO persons (full_name, full_name_folded, phone) VALUES ('Only Here', 'only here', '1234567890')")
            .execute(first.pool())
            .await
            .expect("insert should succeed");

        let row = sqlx::query("SELECT COUNT(*) AS total FROM persons")
            .fetch_one(second.pool())
            .await
            .expect("count should succeed");
        let total: i64 = row.get("total");
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        DbConnection::setup_schema(db.pool())
            .await
            .expect("second schema setup should be a no-op");
    }
}
