use crate::model::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabasesResponse {
    #[serde(default)]
    pub databases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionsResponse {
    #[serde(default)]
    pub collections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocsQuery {
    pub db: String,
    pub collection: String,
    pub page: u32,
    pub limit: u32,
}

/// One page of documents. The server is authoritative for the pagination fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocsPage {
    #[serde(default)]
    pub docs: Vec<Document>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl DocsPage {
    pub fn effective_page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn effective_total_pages(&self) -> u32 {
        self.total_pages.filter(|p| *p > 0).unwrap_or(1)
    }

    pub fn effective_total_count(&self) -> u64 {
        self.total_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDocRequest {
    pub db: String,
    pub collection: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteCollectionRequest {
    pub db: String,
    pub collection: String,
    pub confirm: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDatabaseRequest {
    pub db: String,
    pub confirm: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Error body shape the server uses for non-2xx answers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
