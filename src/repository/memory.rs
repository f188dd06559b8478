//! In-process book store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookPayload},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Book>,
    /// Last id handed out. Ids are never reused, even after a delete.
    last_id: i32,
}

/// Book store kept in memory, lost on restart
#[derive(Default)]
pub struct InMemoryBookStore {
    table: RwLock<Table>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, data: &BookPayload) -> AppResult<Book> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let book = Book::from_payload(table.last_id, data);
        table.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, data: &BookPayload) -> AppResult<Option<Book>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = Book::from_payload(id, data);
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
