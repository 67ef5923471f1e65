// In crates/analytics/src/state.rs

use crate::types::{ListQuery, Predicate, SortSpec};
use core_types::{Error, Result, SortDirection};

/// Per-view list state: active filters, sort, page and page size.
///
/// One rule governs page resets: changing the filters, the sort or the page
/// size sends the view back to page 1, while moving between pages does not.
/// Switching to a different dataset also restores the view's default sort.
/// A page that falls off the end because the data shrank is left alone; the
/// caller sees it through the page metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    dataset: Option<String>,
    predicates: Vec<Predicate>,
    sort: Option<SortSpec>,
    default_sort: Option<SortSpec>,
    page: usize,
    limit: usize,
}

impl ListState {
    pub fn new(default_sort: Option<SortSpec>, limit: usize) -> Result<Self> {
        check_limit(limit)?;
        Ok(Self {
            dataset: None,
            predicates: Vec::new(),
            sort: default_sort.clone(),
            default_sort,
            page: 1,
            limit,
        })
    }

    pub fn dataset(&self) -> Option<&str> {
        self.dataset.as_deref()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Points the view at a dataset. Returns `true` when the identity changed.
    pub fn set_dataset(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.dataset.as_deref() == Some(id.as_str()) {
            return false;
        }
        tracing::debug!(dataset = %id, "Dataset changed; restoring default sort.");
        self.dataset = Some(id);
        self.sort = self.default_sort.clone();
        self.page = 1;
        true
    }

    pub fn set_predicates(&mut self, predicates: Vec<Predicate>) -> Result<()> {
        for predicate in &predicates {
            predicate.validate()?;
        }
        if predicates != self.predicates {
            self.predicates = predicates;
            self.page = 1;
        }
        Ok(())
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Column header click: the active column flips direction, any other
    /// column becomes active in descending order.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = match &self.sort {
            Some(current) if current.field == field => SortSpec::new(field, current.direction.reversed()),
            _ => SortSpec::new(field, SortDirection::Desc),
        };
        self.set_sort(Some(next));
    }

    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(Error::InvalidPagination("page numbers start at 1".to_string()));
        }
        self.page = page;
        Ok(())
    }

    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        check_limit(limit)?;
        if limit != self.limit {
            self.limit = limit;
            self.page = 1;
        }
        Ok(())
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            predicates: self.predicates.clone(),
            sort: self.sort.clone(),
            page: self.page,
            limit: self.limit,
        }
    }
}

fn check_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidPagination("page size must be positive".to_string()));
    }
    Ok(())
}
