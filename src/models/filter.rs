use serde::{Deserialize, Serialize};

use super::order::OrderStatus;
use super::record::Record;

/// Filtros de las listas; en modo nube se envían tal cual como `data`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListFilter {
    pub fn by_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn by_search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status_term().is_none() && self.search_term().is_none()
    }

    /// Estado de pedido antiguo (`processing`) → nombre actual
    fn status_term(&self) -> Option<&str> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| OrderStatus::parse(s).map_or(s, |status| status.as_str()))
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        if let Some(status) = self.status_term() {
            if record.status_key() != Some(status) {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    pub fn apply<T: Record>(&self, records: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
