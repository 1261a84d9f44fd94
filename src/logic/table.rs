use crate::logic::console::Console;
use crate::model::{
    Cell, DestructiveAction, Document, TablePane, TableRow, TableView, ID_FIELD, NO_DOCUMENTS,
};
use log::debug;
use std::collections::BTreeSet;

/// Union of the fields of `docs`, `_id` first and the rest in byte order.
pub fn columns(docs: &[Document]) -> Vec<String> {
    let keys: BTreeSet<&str> = docs.iter().flat_map(Document::keys).collect();
    let mut columns = Vec::with_capacity(keys.len());
    if keys.contains(ID_FIELD) {
        columns.push(ID_FIELD.to_string());
    }
    columns.extend(
        keys.into_iter()
            .filter(|k| *k != ID_FIELD)
            .map(str::to_string),
    );
    columns
}

pub fn render(docs: &[Document]) -> TablePane {
    if docs.is_empty() {
        return TablePane::placeholder(NO_DOCUMENTS);
    }
    let columns = columns(docs);
    let rows = docs
        .iter()
        .map(|doc| TableRow {
            cells: columns
                .iter()
                .map(|column| match doc.get(column) {
                    Some(value) => Cell {
                        text: value.cell_text(),
                        structured: value.is_structured(),
                    },
                    None => Cell {
                        text: String::new(),
                        structured: false,
                    },
                })
                .collect(),
            delete_id: doc.id(),
        })
        .collect();
    TablePane::Table(TableView { columns, rows })
}

impl Console {
    /// Row delete affordance: a plain yes/no confirmation scoped to the open collection.
    pub(crate) fn arm_delete_document(&mut self, id: String) {
        let Some((db, collection)) = self.state.scope() else {
            debug!("no collection open, ignoring delete of {}", id);
            return;
        };
        let action = DestructiveAction::DeleteDocument {
            db: db.to_string(),
            collection: collection.to_string(),
            id,
        };
        self.arm(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ACTION_COLUMN;
    use serde_json::json;

    fn docs(value: serde_json::Value) -> Vec<Document> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn columns_are_union_with_id_first() {
        let page = docs(json!([
            {"_id": "a", "qty": 5},
            {"_id": "b", "name": "x"}
        ]));
        assert_eq!(columns(&page), vec!["_id", "name", "qty"]);
    }

    #[test]
    fn column_order_is_deterministic() {
        let page = docs(json!([
            {"zeta": 1, "Alpha": 2, "_id": 1},
            {"beta": 3, "_class": "x"}
        ]));
        let first = columns(&page);
        let second = columns(&page);
        assert_eq!(first, second);
        // Byte order: uppercase before underscore before lowercase, `_id` pinned first.
        assert_eq!(first, vec!["_id", "Alpha", "_class", "beta", "zeta"]);
    }

    #[test]
    fn missing_id_column_is_not_invented() {
        let page = docs(json!([{"b": 1}, {"a": 2}]));
        assert_eq!(columns(&page), vec!["a", "b"]);
    }

    #[test]
    fn render_fills_cells_and_delete_affordance() {
        let page = docs(json!([
            {"_id": "a", "qty": 5, "tags": ["x"]},
            {"_id": "b", "name": "x", "qty": null}
        ]));
        let pane = render(&page);
        let table = pane.as_table().expect("table");

        assert_eq!(table.headers(), vec!["_id", "name", "qty", "tags", ACTION_COLUMN]);
        assert_eq!(table.cell(0, "qty"), Some("5"));
        assert_eq!(table.cell(0, "name"), Some(""));
        assert_eq!(table.cell(0, "tags"), Some(r#"["x"]"#));
        assert!(table.rows[0].cells[3].structured);
        assert_eq!(table.cell(1, "qty"), Some(""));
        assert_eq!(table.rows[0].delete_id.as_deref(), Some("a"));
        assert_eq!(table.rows[1].delete_id.as_deref(), Some("b"));
    }

    #[test]
    fn empty_page_is_a_neutral_placeholder() {
        assert_eq!(render(&[]), TablePane::Placeholder(NO_DOCUMENTS.to_string()));
    }
}
