use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{Person, PersonId};
use crate::storage::connection::DbConnection;
use crate::storage::traits::PersonStorage;

/// SQLite-backed repository for persons
#[derive(Clone)]
pub struct PersonRepository {
    db: DbConnection,
}

impl PersonRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_person(row: &SqliteRow) -> Person {
        Person {
            id: Some(row.get("id")),
            full_name: row.get("full_name"),
            phone: row.get("phone"),
            email: row.get("email"),
            blog_url: row.get("blog_url"),
            notes: row.get("notes"),
        }
    }

    fn to_sql_offset(offset: u64) -> Result<i64> {
        i64::try_from(offset).context("Page offset is out of range")
    }

    fn to_count(total: i64) -> Result<u64> {
        u64::try_from(total).context("Row count is negative")
    }

    /// Full Unicode lowercase, used for both stored names and search terms
    fn fold_name(name: &str) -> String {
        name.to_lowercase()
    }

    async fn insert(&self, person: &Person) -> Result<Person> {
        let result = sqlx::query(
            r#"
            INSERT INTO persons (full_name, full_name_folded, phone, email, blog_url, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&person.full_name)
        .bind(Self::fold_name(&person.full_name))
        .bind(&person.phone)
        .bind(&person.email)
        .bind(&person.blog_url)
        .bind(&person.notes)
        .execute(self.db.pool())
        .await?;

        Ok(Person {
            id: Some(result.last_insert_rowid()),
            ..person.clone()
        })
    }

    async fn update(&self, id: PersonId, person: &Person) -> Result<Person> {
        let result = sqlx::query(
            r#"
            UPDATE persons
            SET full_name = ?, full_name_folded = ?, phone = ?, email = ?, blog_url = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(&person.full_name)
        .bind(Self::fold_name(&person.full_name))
        .bind(&person.phone)
        .bind(&person.email)
        .bind(&person.blog_url)
        .bind(&person.notes)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        // A concurrent delete between read and write lands here; the row is not re-created
        if result.rows_affected() == 0 {
            return Err(anyhow!("Person {} no longer exists", id));
        }

        Ok(person.clone())
    }
}

#[async_trait]
impl PersonStorage for PersonRepository {
    async fn find_all(&self, offset: u64, limit: u32) -> Result<Vec<Person>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, phone, email, blog_url, notes
            FROM persons
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(limit))
        .bind(Self::to_sql_offset(offset)?)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_person).collect())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM persons")
            .fetch_one(self.db.pool())
            .await?;

        Self::to_count(row.get("total"))
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, phone, email, blog_url, notes
            FROM persons
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_person))
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Person>> {
        // instr() avoids LIKE wildcard escaping
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, phone, email, blog_url, notes
            FROM persons
            WHERE instr(full_name_folded, ?) > 0
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(Self::fold_name(name))
        .bind(i64::from(limit))
        .bind(Self::to_sql_offset(offset)?)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_person).collect())
    }

    async fn count_by_name_containing(&self, name: &str) -> Result<u64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM persons
            WHERE instr(full_name_folded, ?) > 0
            "#,
        )
        .bind(Self::fold_name(name))
        .fetch_one(self.db.pool())
        .await?;

        Self::to_count(row.get("total"))
    }

    async fn save(&self, person: &Person) -> Result<Person> {
        match person.id {
            Some(id) => self.update(id, person).await,
            None => self.insert(person).await,
        }
    }

    async fn delete_by_id(&self, id: PersonId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM persons")
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}
