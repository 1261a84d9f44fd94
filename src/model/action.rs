use serde::{Deserialize, Serialize};

/// An irreversible operation waiting behind the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestructiveAction {
    DeleteDocument {
        db: String,
        collection: String,
        id: String,
    },
    DeleteCollection {
        db: String,
        collection: String,
    },
    DeleteDatabase {
        db: String,
    },
}

impl DestructiveAction {
    /// Text the operator must retype, if any. Documents only need a yes/no.
    pub fn confirm_token(&self) -> Option<&str> {
        match self {
            DestructiveAction::DeleteDocument { .. } => None,
            DestructiveAction::DeleteCollection { collection, .. } => Some(collection),
            DestructiveAction::DeleteDatabase { db } => Some(db),
        }
    }

    pub fn prompt_message(&self) -> String {
        match self {
            DestructiveAction::DeleteDocument { collection, id, .. } => {
                format!("Delete document '{}' from '{}'?", id, collection)
            }
            DestructiveAction::DeleteCollection { db, collection } => format!(
                "Delete collection '{}' from database '{}'? This cannot be undone. Type the collection name to confirm.",
                collection, db
            ),
            DestructiveAction::DeleteDatabase { db } => format!(
                "Delete database '{}' and all of its collections? This cannot be undone. Type the database name to confirm.",
                db
            ),
        }
    }

    /// Short label used in logs.
    pub fn describe(&self) -> String {
        match self {
            DestructiveAction::DeleteDocument { db, collection, id } => {
                format!("document {}/{}/{}", db, collection, id)
            }
            DestructiveAction::DeleteCollection { db, collection } => {
                format!("collection {}/{}", db, collection)
            }
            DestructiveAction::DeleteDatabase { db } => format!("database {}", db),
        }
    }
}
