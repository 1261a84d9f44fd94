use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// A page size drawn from [`PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(size: u32) -> Option<Self> {
        PAGE_SIZES.contains(&size).then_some(Self(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn position(self) -> usize {
        PAGE_SIZES.iter().position(|s| *s == self.0).unwrap_or(0)
    }

    /// Next larger size, wrapping to the smallest.
    pub fn next(self) -> Self {
        Self(PAGE_SIZES[(self.position() + 1) % PAGE_SIZES.len()])
    }

    /// Next smaller size, wrapping to the largest.
    pub fn previous(self) -> Self {
        Self(PAGE_SIZES[(self.position() + PAGE_SIZES.len() - 1) % PAGE_SIZES.len()])
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(25)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size).ok_or_else(|| format!("page size must be one of {:?}, got {}", PAGE_SIZES, size))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single source of truth for what the operator is looking at.
///
/// Selection setters enforce the cascade: a new database clears the collection
/// and rewinds to page 1, a new collection rewinds to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    selected_database: Option<String>,
    selected_collection: Option<String>,
    page: u32,
    limit: PageSize,
    total_pages: u32,
    total_count: u64,
}

impl BrowseState {
    pub fn new(default_database: Option<String>, limit: PageSize) -> Self {
        Self {
            selected_database: default_database,
            selected_collection: None,
            page: 1,
            limit,
            total_pages: 1,
            total_count: 0,
        }
    }

    pub fn selected_database(&self) -> Option<&str> {
        self.selected_database.as_deref()
    }

    pub fn selected_collection(&self) -> Option<&str> {
        self.selected_collection.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> PageSize {
        self.limit
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Both halves of the document scope, when a collection is open.
    pub fn scope(&self) -> Option<(&str, &str)> {
        match (&self.selected_database, &self.selected_collection) {
            (Some(db), Some(coll)) => Some((db.as_str(), coll.as_str())),
            _ => None,
        }
    }

    pub fn select_database(&mut self, name: impl Into<String>) {
        self.selected_database = Some(name.into());
        self.selected_collection = None;
        self.page = 1;
    }

    pub fn clear_database(&mut self) {
        self.selected_database = None;
        self.selected_collection = None;
        self.page = 1;
    }

    /// Ignored when no database is selected.
    pub fn select_collection(&mut self, name: impl Into<String>) -> bool {
        if self.selected_database.is_none() {
            return false;
        }
        self.selected_collection = Some(name.into());
        self.page = 1;
        true
    }

    pub fn clear_collection(&mut self) {
        self.selected_collection = None;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_limit(&mut self, limit: PageSize) {
        self.limit = limit;
        self.page = 1;
    }

    /// Adopt the pagination the server reported for the last page it served.
    pub fn adopt_totals(&mut self, page: u32, total_pages: u32, total_count: u64) {
        self.page = page.max(1);
        self.total_pages = total_pages.max(1);
        self.total_count = total_count;
    }
}
