//! Derived, render-ready view of the console.
//!
//! Everything here is written by the controller in the same call that mutates
//! the state it reflects, so a front-end only ever reads a consistent snapshot.

/// Shown wherever a selection badge or indicator has no value.
pub const EMPTY_MARK: &str = "—";

/// Header of the trailing per-row action column.
pub const ACTION_COLUMN: &str = "Actions";

pub const SELECT_DATABASE_PLACEHOLDER: &str = "Select a database…";
pub const SELECT_COLLECTION_PLACEHOLDER: &str = "Select a collection to view documents.";
pub const NO_DATABASES: &str = "No databases found.";
pub const NO_COLLECTIONS: &str = "No collections found.";
pub const NO_DOCUMENTS: &str = "No documents found.";
pub const LOADING_DATABASES: &str = "Loading databases…";
pub const LOADING_COLLECTIONS: &str = "Loading collections…";
pub const LOADING_DOCUMENTS: &str = "Loading…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub active: bool,
}

/// A selectable list area (databases or collections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPane {
    Placeholder(String),
    Loading(String),
    Error(String),
    Entries(Vec<ListEntry>),
}

impl ListPane {
    pub fn placeholder(text: &str) -> Self {
        ListPane::Placeholder(text.to_string())
    }

    pub fn error(message: &str) -> Self {
        ListPane::Error(format!("Error: {}", message))
    }

    /// Build entries, highlighting `selected` if it is listed.
    pub fn entries(names: Vec<String>, selected: Option<&str>, empty_text: &str) -> Self {
        if names.is_empty() {
            return ListPane::placeholder(empty_text);
        }
        let mut pane = ListPane::Entries(
            names
                .into_iter()
                .map(|name| ListEntry { name, active: false })
                .collect(),
        );
        pane.highlight(selected);
        pane
    }

    /// Mark at most one entry active: the first whose name equals `selected`.
    pub fn highlight(&mut self, selected: Option<&str>) {
        if let ListPane::Entries(entries) = self {
            let mut found = false;
            for entry in entries.iter_mut() {
                entry.active = !found && Some(entry.name.as_str()) == selected;
                found |= entry.active;
            }
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            ListPane::Entries(entries) => entries.iter().map(|e| e.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn active(&self) -> Option<&str> {
        match self {
            ListPane::Entries(entries) => entries
                .iter()
                .find(|e| e.active)
                .map(|e| e.name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// Serialized JSON of a nested value; front-ends may style it as code.
    pub structured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
    /// `_id` carried by the row's delete affordance.
    pub delete_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Header cells including the trailing action column.
    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(ACTION_COLUMN))
            .collect()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.cells.get(idx).map(|c| c.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TablePane {
    Placeholder(String),
    Loading,
    Error(String),
    Table(TableView),
}

impl TablePane {
    pub fn placeholder(text: &str) -> Self {
        TablePane::Placeholder(text.to_string())
    }

    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            TablePane::Table(table) => Some(table),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub indicator: String,
    pub count: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PagerView {
    /// Indicators with no known page; both directions disabled.
    pub fn blank() -> Self {
        Self {
            indicator: format!("Page {} of {}", EMPTY_MARK, EMPTY_MARK),
            count: EMPTY_MARK.to_string(),
            previous_enabled: false,
            next_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginPrompt {
    pub visible: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub message: String,
    /// Whether a text field must be filled with the exact target name.
    pub token_required: bool,
    pub error: Option<String>,
    /// The action is in flight; submit is disabled.
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub active_database: String,
    pub active_collection: String,
    pub databases: ListPane,
    pub collections: ListPane,
    pub table: TablePane,
    pub pager: PagerView,
    pub login: LoginPrompt,
    pub confirm: Option<ConfirmPrompt>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            active_database: EMPTY_MARK.to_string(),
            active_collection: EMPTY_MARK.to_string(),
            databases: ListPane::Loading(LOADING_DATABASES.to_string()),
            collections: ListPane::placeholder(SELECT_DATABASE_PLACEHOLDER),
            table: TablePane::placeholder(SELECT_COLLECTION_PLACEHOLDER),
            pager: PagerView::blank(),
            login: LoginPrompt::default(),
            confirm: None,
        }
    }
}
