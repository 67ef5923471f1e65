// In crates/analytics/src/lib.rs

//! The list presentation pipeline shared by every table in the dashboard:
//! filter rows by predicates, order them by one column, cut out one page.
//! Each stage is a pure function over rows that were already fetched.

pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod sort;
pub mod state;
pub mod types;

pub use filter::filter_rows;
pub use paginate::paginate;
pub use pipeline::run_query;
pub use sort::sort_rows;
pub use state::ListState;
pub use types::{ListQuery, MembershipMode, MissingPolicy, Page, PageMeta, Predicate, SortSpec};
