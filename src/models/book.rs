//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Publication year
    pub year: Option<i32>,
}

/// Create / full-replacement update request. Fields left out become null.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, ToSchema)]
pub struct BookPayload {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
}

impl Book {
    /// Build the stored record for `payload` under `id`
    pub fn from_payload(id: i32, payload: &BookPayload) -> Self {
        Self {
            id,
            title: payload.title.clone(),
            author: payload.author.clone(),
            description: payload.description.clone(),
            year: payload.year,
        }
    }
}
