//! Catalog browser: database and collection lists and their selection.

use crate::error::Result;
use crate::logic::console::Console;
use crate::logic::effects::{Request, Slot};
use crate::model::{
    DestructiveAction, ListPane, PagerView, TablePane, LOADING_COLLECTIONS, LOADING_DATABASES,
    NO_COLLECTIONS, NO_DATABASES, SELECT_COLLECTION_PLACEHOLDER, SELECT_DATABASE_PLACEHOLDER,
};
use log::{info, warn};

impl Console {
    pub(crate) fn load_databases(&mut self) {
        self.keep_database = false;
        self.view.databases = ListPane::Loading(LOADING_DATABASES.to_string());
        self.issue(Request::ListDatabases);
    }

    /// Reload the database list without re-entering the selected database.
    pub(crate) fn relist_databases(&mut self) {
        self.load_databases();
        self.keep_database = true;
    }

    pub(crate) fn apply_databases(&mut self, outcome: Result<Vec<String>>) {
        let names = match outcome {
            Ok(names) => names,
            Err(err) if err.is_unauthorized() => return self.on_unauthorized(),
            Err(err) => {
                warn!("listing databases failed: {}", err);
                self.view.databases = ListPane::error(&err.to_string());
                return;
            }
        };
        let reselect = !std::mem::take(&mut self.keep_database);
        let preselected = self
            .state
            .selected_database()
            .filter(|db| reselect && names.iter().any(|n| n == db))
            .map(str::to_string);
        self.view.databases =
            ListPane::entries(names, self.state.selected_database(), NO_DATABASES);
        // Auto-select happens here only, once per completed load.
        if let Some(db) = preselected {
            self.select_database(&db);
        }
    }

    pub(crate) fn select_database(&mut self, name: &str) {
        info!("selected database {}", name);
        self.state.select_database(name);
        self.view.databases.highlight(Some(name));
        self.update_badges();
        self.clear_documents(SELECT_COLLECTION_PLACEHOLDER);
        self.load_collections();
    }

    pub(crate) fn load_collections(&mut self) {
        let Some(db) = self.state.selected_database().map(str::to_string) else {
            self.tickets.invalidate(Slot::Collections);
            self.view.collections = ListPane::placeholder(SELECT_DATABASE_PLACEHOLDER);
            return;
        };
        self.view.collections = ListPane::Loading(LOADING_COLLECTIONS.to_string());
        self.issue(Request::ListCollections { db });
    }

    pub(crate) fn apply_collections(&mut self, outcome: Result<Vec<String>>) {
        match outcome {
            Ok(names) => {
                self.view.collections =
                    ListPane::entries(names, self.state.selected_collection(), NO_COLLECTIONS);
            }
            Err(err) if err.is_unauthorized() => self.on_unauthorized(),
            Err(err) => {
                warn!("listing collections failed: {}", err);
                self.view.collections = ListPane::error(&err.to_string());
            }
        }
    }

    pub(crate) fn select_collection(&mut self, name: &str) {
        if !self.state.select_collection(name) {
            return;
        }
        info!("selected collection {}", name);
        self.view.collections.highlight(Some(name));
        self.update_badges();
        self.load_documents_page();
    }

    pub(crate) fn arm_delete_collection(&mut self, name: String) {
        let Some(db) = self.state.selected_database().map(str::to_string) else {
            return;
        };
        self.arm(DestructiveAction::DeleteCollection {
            db,
            collection: name,
        });
    }

    pub(crate) fn arm_delete_database(&mut self, name: String) {
        self.arm(DestructiveAction::DeleteDatabase { db: name });
    }

    pub(crate) fn after_collection_deleted(&mut self, db: &str, collection: &str) {
        if self.state.selected_database() != Some(db) {
            return;
        }
        if self.state.selected_collection() == Some(collection) {
            self.state.clear_collection();
            self.update_badges();
            self.clear_documents(SELECT_COLLECTION_PLACEHOLDER);
        }
        self.load_collections();
    }

    pub(crate) fn after_database_deleted(&mut self, db: &str) {
        if self.state.selected_database() != Some(db) {
            return self.relist_databases();
        }
        self.state.clear_database();
        self.update_badges();
        self.tickets.invalidate(Slot::Collections);
        self.view.collections = ListPane::placeholder(SELECT_DATABASE_PLACEHOLDER);
        self.clear_documents(SELECT_COLLECTION_PLACEHOLDER);
        self.load_databases();
    }

    /// Replace the document area with a placeholder and forget any page in flight.
    pub(crate) fn clear_documents(&mut self, text: &str) {
        self.tickets.invalidate(Slot::Documents);
        self.view.table = TablePane::placeholder(text);
        self.view.pager = PagerView::blank();
    }
}
