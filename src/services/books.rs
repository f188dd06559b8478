//! Book resource service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload},
    repository::Repository,
};

fn not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, data: &BookPayload) -> AppResult<Book> {
        let book = self.repository.books.insert(data).await?;
        tracing::info!(book_id = book.id, "Book created");
        Ok(book)
    }

    /// Full replacement: optional fields missing from `data` are cleared
    pub async fn update(&self, id: i32, data: &BookPayload) -> AppResult<Book> {
        let book = self
            .repository
            .books
            .update(id, data)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repository.books.delete(id).await? {
            return Err(not_found());
        }
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Store round-trip for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
