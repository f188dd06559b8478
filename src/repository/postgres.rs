//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{pool::PoolConnection, Pool, Postgres};

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookPayload},
};

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check a connection out of the pool. It goes back when dropped, on
    /// every path out of the caller.
    async fn session(&self) -> AppResult<PoolConnection<Postgres>> {
        let session = self.pool.acquire().await?;
        tracing::debug!(idle = self.pool.num_idle(), "Acquired database session");
        Ok(session)
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let mut session = self.session().await?;
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, description, year FROM books ORDER BY id",
        )
        .fetch_all(&mut *session)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        let mut session = self.session().await?;
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, description, year FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *session)
        .await?;
        Ok(row)
    }

    async fn insert(&self, data: &BookPayload) -> AppResult<Book> {
        let mut session = self.session().await?;
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, description, year)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, description, year
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.description)
        .bind(data.year)
        .fetch_one(&mut *session)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &BookPayload) -> AppResult<Option<Book>> {
        let mut session = self.session().await?;
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, description = $3, year = $4
            WHERE id = $5
            RETURNING id, title, author, description, year
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.description)
        .bind(data.year)
        .bind(id)
        .fetch_optional(&mut *session)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut session = self.session().await?;
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *session)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut session = self.session().await?;
        sqlx::query("SELECT 1").execute(&mut *session).await?;
        Ok(())
    }
}
