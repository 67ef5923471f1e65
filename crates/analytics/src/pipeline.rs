// In crates/analytics/src/pipeline.rs

use crate::filter::filter_rows;
use crate::paginate::paginate;
use crate::sort::sort_rows;
use crate::types::{ListQuery, Page};
use core_types::{Record, Result};

/// Runs the full list pipeline for one render pass: filter, sort, paginate.
pub fn run_query<R: Record + Clone>(rows: &[R], query: &ListQuery) -> Result<Page<R>> {
    let filtered = filter_rows(rows, &query.predicates)?;
    let sorted = sort_rows(filtered, query.sort.as_ref())?;
    let page = paginate(&sorted, query.page, query.limit)?;

    if page.meta.is_out_of_range(query.page) && page.meta.total > 0 {
        tracing::warn!(
            page = query.page,
            total_pages = page.meta.total_pages,
            "Requested page is beyond the filtered result set."
        );
    }
    Ok(page)
}
