use crate::error::Result;
use crate::model::{DeleteCollectionRequest, DeleteDatabaseRequest, DeleteDocRequest, DocsPage, DocsQuery};
use std::sync::Arc;

/// The remote catalog + document API consumed by the console.
///
/// Implementations must report a 401 as [`crate::ConsoleError::Unauthorized`]
/// whatever the endpoint.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_databases(&self) -> Result<Vec<String>>;
    async fn list_collections(&self, db: &str) -> Result<Vec<String>>;
    async fn fetch_docs(&self, query: &DocsQuery) -> Result<DocsPage>;
    async fn delete_doc(&self, request: &DeleteDocRequest) -> Result<()>;
    async fn delete_collection(&self, request: &DeleteCollectionRequest) -> Result<()>;
    async fn delete_database(&self, request: &DeleteDatabaseRequest) -> Result<()>;
    async fn login(&self, password: &str) -> Result<()>;
    async fn logout(&self) -> Result<()>;
}

#[async_trait::async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn list_databases(&self) -> Result<Vec<String>> {
        (**self).list_databases().await
    }
    async fn list_collections(&self, db: &str) -> Result<Vec<String>> {
        (**self).list_collections(db).await
    }
    async fn fetch_docs(&self, query: &DocsQuery) -> Result<DocsPage> {
        (**self).fetch_docs(query).await
    }
    async fn delete_doc(&self, request: &DeleteDocRequest) -> Result<()> {
        (**self).delete_doc(request).await
    }
    async fn delete_collection(&self, request: &DeleteCollectionRequest) -> Result<()> {
        (**self).delete_collection(request).await
    }
    async fn delete_database(&self, request: &DeleteDatabaseRequest) -> Result<()> {
        (**self).delete_database(request).await
    }
    async fn login(&self, password: &str) -> Result<()> {
        (**self).login(password).await
    }
    async fn logout(&self) -> Result<()> {
        (**self).logout().await
    }
}
