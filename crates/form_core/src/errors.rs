//! Field-keyed validation messages.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key of the list-level "not enough documents" message.
pub const DOCUMENTS_KEY: &str = "documents";

pub const DOCUMENTS_ROW_PREFIX: &str = "documents-";

pub fn document_row_key(index: usize) -> String {
    format!("{DOCUMENTS_ROW_PREFIX}{index}")
}

fn parse_row_key(key: &str) -> Option<usize> {
    key.strip_prefix(DOCUMENTS_ROW_PREFIX)?.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn row_error(&self, index: usize) -> Option<&str> {
        self.get(&document_row_key(index))
    }

    /// Drops the message of a removed row and shifts later rows down by one.
    pub(crate) fn shift_rows_after_removal(&mut self, removed: usize) {
        let row_entries: Vec<(usize, String)> = self
            .0
            .iter()
            .filter_map(|(key, message)| parse_row_key(key).map(|index| (index, message.clone())))
            .collect();
        self.0.retain(|key, _| parse_row_key(key).is_none());

        for (index, message) in row_entries {
            if index < removed {
                self.insert(document_row_key(index), message);
            } else if index > removed {
                self.insert(document_row_key(index - 1), message);
            }
        }
    }
}
