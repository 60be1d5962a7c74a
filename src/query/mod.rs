//! Query views - free-text filter, typed sort and windowed pagination over records.
//!
//! The pipeline re-runs in full on every state change; the inputs are bounded
//! in-session query results, not an unbounded store.

mod paging;
mod sort;
mod view;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::Record;

pub use paging::page_numbers;
pub use view::QueryView;

/// How a sortable field is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Collation-aware text comparison.
    Text,
    /// Parsed timestamp; missing or unparsable values sort earliest.
    Date,
    /// Numeric comparison; missing values count as 0.
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Ascending,
    #[default]
    #[serde(rename = "DESC")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Which fields a view filters over and how each sortable field compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub filter_fields: Vec<String>,
    pub sort_fields: BTreeMap<String, FieldKind>,
    /// Used whenever a state asks for a page size of 0.
    pub default_page_size: usize,
}

impl QueryConfig {
    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.sort_fields.get(field).copied()
    }
}

/// The credit listing: credit and invoice numbers, type, status and values.
impl Default for QueryConfig {
    fn default() -> Self {
        let mut sort_fields = BTreeMap::new();
        for field in ["dataConstituicao", "dataEmissao", "dataSolicitacao", "dataAnalise"] {
            sort_fields.insert(field.to_string(), FieldKind::Date);
        }
        for field in [
            "id",
            "valor",
            "valorIssqn",
            "aliquota",
            "valorFaturado",
            "valorDeducao",
            "baseCalculo",
        ] {
            sort_fields.insert(field.to_string(), FieldKind::Number);
        }
        for field in [
            "numeroCredito",
            "numeroNfse",
            "tipoCredito",
            "status",
            "nomeSolicitante",
            "simplesNacional",
        ] {
            sort_fields.insert(field.to_string(), FieldKind::Text);
        }

        Self {
            filter_fields: [
                "numeroCredito",
                "numeroNfse",
                "tipoCredito",
                "status",
                "valorIssqn",
                "valor",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            sort_fields,
            default_page_size: 20,
        }
    }
}

/// Filter, sort and page parameters for one render of a record list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    pub filter_term: String,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filter_term: String::new(),
            sort_field: "dataConstituicao".to_string(),
            sort_direction: SortDirection::Descending,
            page: 0,
            page_size: 20,
        }
    }
}

impl QueryState {
    /// Default listing state with a filter term.
    pub fn filtered(term: impl Into<String>) -> Self {
        Self {
            filter_term: term.into(),
            ..Self::default()
        }
    }

    /// Replace the filter term and return to the first page.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter_term = term.into();
        self.page = 0;
    }

    /// Re-selecting the current field flips direction; a new field starts
    /// descending. Either way the view returns to the first page.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Descending;
        }
        self.page = 0;
    }

    /// Move to `page` if it exists. Returns whether the page changed.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < total_pages && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }
}

/// One page of a query plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub items: Vec<Record>,
    /// Records matching the filter, across all pages.
    pub total_count: usize,
    pub total_pages: usize,
    /// Page index the items belong to.
    pub page: usize,
}

impl QueryResult {
    /// Pager window around the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        page_numbers(self.page, self.total_pages, max_visible)
    }
}
