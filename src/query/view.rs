use super::paging::{page_bounds, total_pages};
use super::sort::sort_records;
use super::{QueryConfig, QueryResult, QueryState};
use crate::record::{field_text, Record};

/// Filter, sort and paginate records according to a [`QueryState`].
#[derive(Debug, Clone, Default)]
pub struct QueryView {
    config: QueryConfig,
}

impl QueryView {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Run the full pipeline. Never fails: a page past the end is simply empty.
    pub fn apply(&self, records: &[Record], state: &QueryState) -> QueryResult {
        let mut matching = self.filter(records, &state.filter_term);

        match self.config.kind_of(&state.sort_field) {
            Some(kind) => sort_records(&mut matching, &state.sort_field, kind, state.sort_direction),
            None if state.sort_field.is_empty() => {}
            None => {
                tracing::debug!(field = %state.sort_field, "sort field not configured, keeping order");
            }
        }

        let page_size = if state.page_size == 0 {
            self.config.default_page_size.max(1)
        } else {
            state.page_size
        };

        let total_count = matching.len();
        let (start, end) = page_bounds(total_count, state.page, page_size);

        QueryResult {
            items: matching[start..end].iter().map(|r| (*r).clone()).collect(),
            total_count,
            total_pages: total_pages(total_count, page_size),
            page: state.page,
        }
    }

    /// Records where the trimmed, case-insensitive term occurs in any filter field.
    pub fn filter<'r>(&self, records: &'r [Record], term: &str) -> Vec<&'r Record> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return records.iter().collect();
        }

        records
            .iter()
            .filter(|record| {
                self.config
                    .filter_fields
                    .iter()
                    .any(|field| field_text(record, field).to_lowercase().contains(&term))
            })
            .collect()
    }
}
