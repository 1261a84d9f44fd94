use crate::api::traits::CatalogApi;
use crate::error::{ConsoleError, Result};
use crate::model::{
    CollectionsResponse, DatabasesResponse, DeleteCollectionRequest, DeleteDatabaseRequest,
    DeleteDocRequest, DocsPage, DocsQuery, ErrorBody, LoginRequest,
};
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// [`CatalogApi`] over HTTP/JSON.
///
/// The server session lives in a cookie, so the underlying client keeps a
/// cookie store for its whole lifetime.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!("GET {}", path);
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let response = check(path, response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!("POST {}", path);
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        check(path, response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into a [`ConsoleError`]. A 401 is reported before
/// any attempt to read the body.
async fn check(path: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        debug!("{} answered 401", path);
        return Err(ConsoleError::Unauthorized);
    }
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status.as_u16(), &body);
    warn!("{} failed with {}: {}", path, status, message);
    Err(ConsoleError::request_failed(Some(status.as_u16()), message))
}

/// `error` field of a JSON body, else the raw text, else `HTTP <status>`.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
            return error;
        }
    }
    if !body.trim().is_empty() {
        return body.to_string();
    }
    format!("HTTP {}", status)
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_databases(&self) -> Result<Vec<String>> {
        let body: DatabasesResponse = self.get_json("/api/databases", &[] as &[(&str, &str)]).await?;
        Ok(body.databases)
    }

    async fn list_collections(&self, db: &str) -> Result<Vec<String>> {
        let body: CollectionsResponse = self.get_json("/api/collections", &[("db", db)]).await?;
        Ok(body.collections)
    }

    async fn fetch_docs(&self, query: &DocsQuery) -> Result<DocsPage> {
        self.get_json("/api/docs", query).await
    }

    async fn delete_doc(&self, request: &DeleteDocRequest) -> Result<()> {
        self.post("/api/delete_doc", Some(request)).await
    }

    async fn delete_collection(&self, request: &DeleteCollectionRequest) -> Result<()> {
        self.post("/api/delete_collection", Some(request)).await
    }

    async fn delete_database(&self, request: &DeleteDatabaseRequest) -> Result<()> {
        self.post("/api/delete_database", Some(request)).await
    }

    async fn login(&self, password: &str) -> Result<()> {
        let body = LoginRequest {
            password: password.to_string(),
        };
        // A 401 here rejects the password; it says nothing about a lost session.
        match self.post("/login", Some(&body)).await {
            Err(ConsoleError::Unauthorized) => Err(ConsoleError::InvalidCredentials),
            other => other,
        }
    }

    async fn logout(&self) -> Result<()> {
        self.post::<()>("/logout", None).await
    }
}
