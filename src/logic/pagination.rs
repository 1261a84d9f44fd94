//! Pagination controller: page/limit bookkeeping and the pager indicators.

use crate::error::Result;
use crate::logic::console::Console;
use crate::logic::effects::Request;
use crate::logic::table;
use crate::model::{
    DocsPage, DocsQuery, PageSize, PagerView, TablePane, EMPTY_MARK,
    SELECT_COLLECTION_PLACEHOLDER,
};
use log::warn;

/// Indicators and navigation enablement for a successfully loaded page.
pub fn pager_view(page: u32, total_pages: u32, total_count: u64) -> PagerView {
    PagerView {
        indicator: format!("Page {} of {}", page, total_pages),
        count: if total_count > 0 {
            format!("{} documents total", format_count(total_count))
        } else {
            EMPTY_MARK.to_string()
        },
        previous_enabled: page > 1,
        next_enabled: page < total_pages,
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl Console {
    pub(crate) fn load_documents_page(&mut self) {
        let Some((db, collection)) = self.state.scope() else {
            self.clear_documents(SELECT_COLLECTION_PLACEHOLDER);
            return;
        };
        let query = DocsQuery {
            db: db.to_string(),
            collection: collection.to_string(),
            page: self.state.page(),
            limit: self.state.limit().get(),
        };
        self.view.table = TablePane::Loading;
        self.issue(Request::FetchDocs(query));
    }

    pub(crate) fn apply_docs(&mut self, outcome: Result<DocsPage>) {
        match outcome {
            Ok(page) => {
                self.state.adopt_totals(
                    page.effective_page(),
                    page.effective_total_pages(),
                    page.effective_total_count(),
                );
                self.view.table = table::render(&page.docs);
                self.view.pager = pager_view(
                    self.state.page(),
                    self.state.total_pages(),
                    self.state.total_count(),
                );
            }
            Err(err) if err.is_unauthorized() => self.on_unauthorized(),
            Err(err) => {
                warn!("loading documents failed: {}", err);
                self.view.table = TablePane::Error(format!("Error: {}", err));
                self.view.pager = PagerView::blank();
            }
        }
    }

    pub(crate) fn previous_page(&mut self) {
        if !self.view.pager.previous_enabled || self.state.page() <= 1 {
            return;
        }
        self.state.set_page(self.state.page() - 1);
        self.load_documents_page();
    }

    pub(crate) fn next_page(&mut self) {
        if !self.view.pager.next_enabled || self.state.page() >= self.state.total_pages() {
            return;
        }
        self.state.set_page(self.state.page() + 1);
        self.load_documents_page();
    }

    pub(crate) fn change_limit(&mut self, limit: PageSize) {
        self.state.set_limit(limit);
        self.load_documents_page();
    }
}
