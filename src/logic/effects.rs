//! Requests the controller asks for, and the completions that come back.
//!
//! The controller never awaits anything itself. It hands out [`Ticket`]s, a
//! runner executes them against a [`CatalogApi`], and the resulting
//! [`Completion`] is fed back in. Tickets are numbered so that a completion
//! for a view that has since been re-requested can be recognised and dropped.

use crate::api::CatalogApi;
use crate::error::Result;
use crate::model::{
    DeleteCollectionRequest, DeleteDatabaseRequest, DeleteDocRequest, DestructiveAction, DocsPage,
    DocsQuery,
};
use log::debug;
use std::collections::HashMap;

/// The area of the console a request feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Databases,
    Collections,
    Documents,
    Confirmation,
    Session,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListDatabases,
    ListCollections { db: String },
    FetchDocs(DocsQuery),
    Execute(DestructiveAction),
    Login { password: String },
    Logout,
}

impl Request {
    pub fn slot(&self) -> Slot {
        match self {
            Request::ListDatabases => Slot::Databases,
            Request::ListCollections { .. } => Slot::Collections,
            Request::FetchDocs(_) => Slot::Documents,
            Request::Execute(_) => Slot::Confirmation,
            Request::Login { .. } | Request::Logout => Slot::Session,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: u64,
    pub request: Request,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Databases(Vec<String>),
    Collections(Vec<String>),
    Docs(DocsPage),
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Reply>,
}

impl Completion {
    pub fn new(ticket: Ticket, outcome: Result<Reply>) -> Self {
        Self { ticket, outcome }
    }
}

/// Monotonic ticket numbering with the latest ticket remembered per slot.
#[derive(Debug, Default)]
pub struct Tickets {
    next: u64,
    latest: HashMap<Slot, u64>,
}

impl Tickets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, request: Request) -> Ticket {
        self.next += 1;
        let id = self.next;
        self.latest.insert(request.slot(), id);
        debug!("ticket #{} issued for {:?}", id, request.slot());
        Ticket { id, request }
    }

    /// Whether `ticket` is still the newest request for its slot.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.request.slot()) == Some(&ticket.id)
    }

    /// Drop the expectation for a slot so that any outstanding answer is stale.
    pub fn invalidate(&mut self, slot: Slot) {
        self.latest.remove(&slot);
    }

    pub fn invalidate_all(&mut self) {
        self.latest.clear();
    }
}

/// Run one ticket against the API.
pub async fn execute<A>(api: &A, ticket: Ticket) -> Completion
where
    A: CatalogApi + ?Sized,
{
    let outcome = match &ticket.request {
        Request::ListDatabases => api.list_databases().await.map(Reply::Databases),
        Request::ListCollections { db } => api.list_collections(db).await.map(Reply::Collections),
        Request::FetchDocs(query) => api.fetch_docs(query).await.map(Reply::Docs),
        Request::Execute(action) => execute_action(api, action).await.map(|_| Reply::Done),
        Request::Login { password } => api.login(password).await.map(|_| Reply::Done),
        Request::Logout => api.logout().await.map(|_| Reply::Done),
    };
    Completion::new(ticket, outcome)
}

async fn execute_action<A>(api: &A, action: &DestructiveAction) -> Result<()>
where
    A: CatalogApi + ?Sized,
{
    match action {
        DestructiveAction::DeleteDocument { db, collection, id } => {
            api.delete_doc(&DeleteDocRequest {
                db: db.clone(),
                collection: collection.clone(),
                id: id.clone(),
            })
            .await
        }
        DestructiveAction::DeleteCollection { db, collection } => {
            api.delete_collection(&DeleteCollectionRequest {
                db: db.clone(),
                collection: collection.clone(),
                confirm: collection.clone(),
            })
            .await
        }
        DestructiveAction::DeleteDatabase { db } => {
            api.delete_database(&DeleteDatabaseRequest {
                db: db.clone(),
                confirm: db.clone(),
            })
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older_for_same_slot() {
        let mut tickets = Tickets::new();
        let first = tickets.issue(Request::ListDatabases);
        let second = tickets.issue(Request::ListDatabases);
        let other = tickets.issue(Request::ListCollections { db: "shop".into() });

        assert!(!tickets.is_current(&first));
        assert!(tickets.is_current(&second));
        assert!(tickets.is_current(&other));
        assert!(second.id > first.id);
    }

    #[test]
    fn invalidated_slot_has_no_current_ticket() {
        let mut tickets = Tickets::new();
        let t = tickets.issue(Request::Logout);
        tickets.invalidate(Slot::Session);
        assert!(!tickets.is_current(&t));

        let d = tickets.issue(Request::ListDatabases);
        tickets.invalidate_all();
        assert!(!tickets.is_current(&d));
    }
}
