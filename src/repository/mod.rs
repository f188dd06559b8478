//! Repository layer for database operations

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookPayload},
};

pub use memory::InMemoryBookStore;
pub use postgres::PgBookStore;

/// Persistence provider for book records.
///
/// Each call is one atomic operation against its own session. Lookups by id
/// report absence as `None` / `false`; turning that into a 404 is up to the
/// service layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, id: i32) -> AppResult<Option<Book>>;

    /// Insert a new record and return it with its assigned id
    async fn insert(&self, data: &BookPayload) -> AppResult<Book>;

    /// Overwrite every mutable field of `id`
    async fn update(&self, id: i32, data: &BookPayload) -> AppResult<Option<Book>>;

    /// Returns `false` when no row had that id
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Cheap round-trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the configured stores
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }

    /// Repository backed by a PostgreSQL pool
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(PgBookStore::new(pool)))
    }

    /// Repository backed by process memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBookStore::new()))
    }
}
