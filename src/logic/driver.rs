//! Sequential runner that pairs a [`Console`] with a [`CatalogApi`].
//!
//! Every ticket the console hands out is executed in order and its completion
//! fed back until the queue is empty. The terminal front end runs tickets
//! concurrently instead; this runner is what headless callers and the tests use.

use crate::api::CatalogApi;
use crate::logic::console::{Console, Event};
use crate::logic::effects::{execute, Ticket};
use log::debug;
use std::collections::VecDeque;

pub struct Driver<A: CatalogApi> {
    api: A,
    console: Console,
}

impl<A: CatalogApi> Driver<A> {
    pub fn new(api: A, console: Console) -> Self {
        Self { api, console }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn start(&mut self) {
        let tickets = self.console.start();
        self.run(tickets).await;
    }

    pub async fn dispatch(&mut self, event: Event) {
        let tickets = self.console.handle(event);
        self.run(tickets).await;
    }

    async fn run(&mut self, tickets: Vec<Ticket>) {
        let mut queue: VecDeque<Ticket> = tickets.into();
        while let Some(ticket) = queue.pop_front() {
            debug!("running ticket #{}", ticket.id);
            let completion = execute(&self.api, ticket).await;
            queue.extend(self.console.complete(completion));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConsoleError, Result};
    use crate::model::{
        DeleteCollectionRequest, DeleteDatabaseRequest, DeleteDocRequest, DocsPage, DocsQuery,
        Document, PageSize,
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::BTreeMap;

    /// In-memory catalog; the session must log in with "secret" before anything else works.
    #[derive(Default)]
    struct FakeApi {
        data: Mutex<BTreeMap<String, BTreeMap<String, Vec<Document>>>>,
        authenticated: Mutex<bool>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn seeded(authenticated: bool) -> Self {
            let orders: Vec<Document> = serde_json::from_value(json!([
                {"_id": "a", "qty": 5},
                {"_id": "b", "name": "x"}
            ]))
            .unwrap();
            let mut shop = BTreeMap::new();
            shop.insert("orders".to_string(), orders);
            shop.insert("users".to_string(), Vec::new());
            let mut data = BTreeMap::new();
            data.insert("shop".to_string(), shop);
            Self {
                data: Mutex::new(data),
                authenticated: Mutex::new(authenticated),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn guard(&self, call: &str) -> Result<()> {
            self.calls.lock().push(call.to_string());
            if *self.authenticated.lock() {
                Ok(())
            } else {
                Err(ConsoleError::Unauthorized)
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn list_databases(&self) -> Result<Vec<String>> {
            self.guard("databases")?;
            Ok(self.data.lock().keys().cloned().collect())
        }

        async fn list_collections(&self, db: &str) -> Result<Vec<String>> {
            self.guard("collections")?;
            let data = self.data.lock();
            let db = data
                .get(db)
                .ok_or_else(|| ConsoleError::request_failed(Some(404), "Database not found."))?;
            Ok(db.keys().cloned().collect())
        }

        async fn fetch_docs(&self, query: &DocsQuery) -> Result<DocsPage> {
            self.guard("docs")?;
            let data = self.data.lock();
            let docs = data
                .get(&query.db)
                .and_then(|db| db.get(&query.collection))
                .ok_or_else(|| ConsoleError::request_failed(Some(404), "Collection not found."))?;
            let limit = query.limit as usize;
            let total = docs.len() as u64;
            let total_pages = ((docs.len() + limit - 1) / limit).max(1) as u32;
            let start = (query.page as usize - 1) * limit;
            Ok(DocsPage {
                docs: docs.iter().skip(start).take(limit).cloned().collect(),
                page: Some(query.page),
                limit: Some(query.limit),
                total_pages: Some(total_pages),
                total_count: Some(total),
            })
        }

        async fn delete_doc(&self, request: &DeleteDocRequest) -> Result<()> {
            self.guard("delete_doc")?;
            let mut data = self.data.lock();
            let docs = data
                .get_mut(&request.db)
                .and_then(|db| db.get_mut(&request.collection))
                .ok_or_else(|| ConsoleError::request_failed(Some(404), "Collection not found."))?;
            let before = docs.len();
            docs.retain(|d| d.id().as_deref() != Some(request.id.as_str()));
            if docs.len() == before {
                return Err(ConsoleError::request_failed(Some(404), "Document not found."));
            }
            Ok(())
        }

        async fn delete_collection(&self, request: &DeleteCollectionRequest) -> Result<()> {
            self.guard("delete_collection")?;
            if request.confirm != request.collection {
                return Err(ConsoleError::request_failed(
                    Some(400),
                    "Confirmation does not match.",
                ));
            }
            if let Some(db) = self.data.lock().get_mut(&request.db) {
                db.remove(&request.collection);
            }
            Ok(())
        }

        async fn delete_database(&self, request: &DeleteDatabaseRequest) -> Result<()> {
            self.guard("delete_database")?;
            self.data.lock().remove(&request.db);
            Ok(())
        }

        async fn login(&self, password: &str) -> Result<()> {
            self.calls.lock().push("login".to_string());
            if password != "secret" {
                return Err(ConsoleError::InvalidCredentials);
            }
            *self.authenticated.lock() = true;
            Ok(())
        }

        async fn logout(&self) -> Result<()> {
            self.calls.lock().push("logout".to_string());
            *self.authenticated.lock() = false;
            Ok(())
        }
    }

    fn driver(authenticated: bool, default_db: Option<&str>) -> Driver<FakeApi> {
        Driver::new(
            FakeApi::seeded(authenticated),
            Console::new(default_db.map(str::to_string), PageSize::default()),
        )
    }

    #[tokio::test]
    async fn start_with_default_database_lands_on_collections() {
        let mut driver = driver(true, Some("shop"));
        driver.start().await;

        let view = driver.console().view();
        assert_eq!(view.databases.active(), Some("shop"));
        assert_eq!(view.collections.names(), vec!["orders", "users"]);
        assert_eq!(driver.api().calls(), vec!["databases", "collections"]);
    }

    #[tokio::test]
    async fn browsing_a_collection_renders_page() {
        let mut driver = driver(true, Some("shop"));
        driver.start().await;
        driver.dispatch(Event::SelectCollection("orders".into())).await;

        let view = driver.console().view();
        let table = view.table.as_table().expect("table");
        assert_eq!(table.columns, vec!["_id", "name", "qty"]);
        assert_eq!(view.pager.indicator, "Page 1 of 1");
        assert_eq!(view.pager.count, "2 documents total");
        assert!(!view.pager.next_enabled);
    }

    #[tokio::test]
    async fn unauthorized_start_recovers_after_login() {
        let mut driver = driver(false, Some("shop"));
        driver.start().await;
        assert!(driver.console().view().login.visible);

        driver
            .dispatch(Event::Login {
                password: "wrong".into(),
            })
            .await;
        assert_eq!(
            driver.console().view().login.error.as_deref(),
            Some("Invalid password.")
        );

        driver
            .dispatch(Event::Login {
                password: "secret".into(),
            })
            .await;
        let console = driver.console();
        assert!(!console.view().login.visible);
        assert!(console.session().authenticated);
        assert_eq!(console.view().collections.names(), vec!["orders", "users"]);
    }

    #[tokio::test]
    async fn deleting_a_document_reloads_the_page() {
        let mut driver = driver(true, Some("shop"));
        driver.start().await;
        driver.dispatch(Event::SelectCollection("orders".into())).await;
        driver.dispatch(Event::ArmDeleteDocument { id: "a".into() }).await;
        driver
            .dispatch(Event::ConfirmDeletion {
                typed: String::new(),
            })
            .await;

        let view = driver.console().view();
        assert!(view.confirm.is_none());
        let table = view.table.as_table().expect("table");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.cell(0, "_id"), Some("b"));
        assert_eq!(view.pager.count, "1 documents total");
    }

    #[tokio::test]
    async fn deleting_the_database_returns_to_empty_catalog() {
        let mut driver = driver(true, Some("shop"));
        driver.start().await;
        driver
            .dispatch(Event::ArmDeleteDatabase {
                name: "shop".into(),
            })
            .await;
        driver
            .dispatch(Event::ConfirmDeletion {
                typed: "shop".into(),
            })
            .await;

        let console = driver.console();
        assert_eq!(console.state().selected_database(), None);
        assert!(console.view().databases.names().is_empty());
        assert!(driver.api().calls().contains(&"delete_database".to_string()));
    }
}
