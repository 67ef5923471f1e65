// In crates/analytics/src/types.rs

use core_types::{Error, FieldKind, FieldValue, Result, SortDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a row with a `Null` value fares under a numeric range predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// A missing value fails the range (explorer table behavior).
    #[default]
    Exclude,
    /// A missing value passes the range (order list behavior).
    Include,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipMode {
    /// The row's values must intersect the selection.
    #[default]
    Include,
    /// The row's values must not intersect the selection.
    Exclude,
}

/// A single filter condition, evaluated independently against each row.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Range {
        field: String,
        min: Option<Decimal>,
        max: Option<Decimal>,
        missing: MissingPolicy,
    },
    Select {
        field: String,
        selected: Option<FieldValue>,
    },
    Membership {
        field: String,
        values: BTreeSet<String>,
        mode: MembershipMode,
    },
}

impl Predicate {
    pub fn range(field: impl Into<String>, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Predicate::Range {
            field: field.into(),
            min,
            max,
            missing: MissingPolicy::default(),
        }
    }

    pub fn select(field: impl Into<String>, selected: impl Into<FieldValue>) -> Self {
        Predicate::Select {
            field: field.into(),
            selected: Some(selected.into()),
        }
    }

    pub fn membership<I, S>(field: impl Into<String>, values: I, mode: MembershipMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Membership {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    /// Sets the missing-value policy. Only range predicates carry one.
    pub fn with_missing(self, policy: MissingPolicy) -> Self {
        match self {
            Predicate::Range { field, min, max, .. } => Predicate::Range {
                field,
                min,
                max,
                missing: policy,
            },
            other => other,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Predicate::Range { field, .. }
            | Predicate::Select { field, .. }
            | Predicate::Membership { field, .. } => field,
        }
    }

    /// Rejects predicates that can never be evaluated meaningfully.
    pub fn validate(&self) -> Result<()> {
        let field = self.field();
        if field.trim().is_empty() {
            return Err(invalid(field, "field name is empty"));
        }
        match self {
            Predicate::Range {
                min: Some(min),
                max: Some(max),
                ..
            } if min > max => Err(invalid(field, &format!("min ({min}) is greater than max ({max})"))),
            Predicate::Select {
                selected: Some(value),
                ..
            } => match value.kind() {
                FieldKind::Null => Err(invalid(field, "cannot select a null value")),
                FieldKind::List => Err(invalid(field, "cannot select a list value")),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidPredicate {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// The active `(field, direction)` pair for a list view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Describes how a sliced page relates to the full filtered and sorted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl PageMeta {
    /// True when `page` lies past the last page and therefore yields no rows.
    pub fn is_out_of_range(&self, page: usize) -> bool {
        page == 0 || page > self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    pub data: Vec<R>,
    pub meta: PageMeta,
}

/// Everything one render pass needs to turn a dataset into a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub predicates: Vec<Predicate>,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub limit: usize,
}
