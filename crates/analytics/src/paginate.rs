// In crates/analytics/src/paginate.rs

use crate::types::{Page, PageMeta};
use core_types::{Error, Result};

/// Slices one page out of `rows`. Pages are 1-based.
///
/// A page past the end yields empty `data` with the usual metadata; callers
/// detect that through [`PageMeta::is_out_of_range`].
pub fn paginate<R: Clone>(rows: &[R], page: usize, limit: usize) -> Result<Page<R>> {
    if page == 0 {
        return Err(Error::InvalidPagination("page numbers start at 1".to_string()));
    }
    if limit == 0 {
        return Err(Error::InvalidPagination("page size must be positive".to_string()));
    }

    let meta = PageMeta {
        total: rows.len(),
        limit,
        total_pages: rows.len().div_ceil(limit),
    };

    let start = (page - 1).saturating_mul(limit);
    let data = if start >= rows.len() {
        tracing::debug!(page, total_pages = meta.total_pages, "Requested page is past the end.");
        Vec::new()
    } else {
        let end = start.saturating_add(limit).min(rows.len());
        rows[start..end].to_vec()
    };

    Ok(Page { data, meta })
}
