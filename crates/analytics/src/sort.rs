// In crates/analytics/src/sort.rs

use crate::types::SortSpec;
use core_types::{Error, FieldKind, FieldValue, Record, Result, SortDirection};
use std::cmp::Ordering;

/// Orders rows by the sort specification, or returns them untouched when
/// there is none.
///
/// The sort is stable: rows with equal keys keep their input order. Views rely
/// on this to keep an implicit recency order among ties, and it makes sorting
/// idempotent. `Null` keys go last in both directions.
pub fn sort_rows<R: Record>(rows: Vec<R>, spec: Option<&SortSpec>) -> Result<Vec<R>> {
    let Some(spec) = spec else {
        return Ok(rows);
    };

    let mut keyed = rows
        .into_iter()
        .map(|row| {
            row.sort_value(&spec.field, spec.direction)
                .map(|key| (key, row))
                .ok_or_else(|| Error::unknown_field(&spec.field))
        })
        .collect::<Result<Vec<_>>>()?;

    check_key_kinds(&spec.field, keyed.iter().map(|(key, _)| key))?;

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, spec.direction));

    tracing::debug!(field = %spec.field, direction = ?spec.direction, rows = keyed.len(), "Sorted rows.");
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// The two-way comparator used by [`sort_rows`].
///
/// Callers must have checked that both keys share an orderable kind. Nulls are
/// placed after every value regardless of direction.
pub fn compare_keys(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

fn check_key_kinds<'a>(field: &str, keys: impl Iterator<Item = &'a FieldValue>) -> Result<()> {
    let mut seen: Option<FieldKind> = None;
    for key in keys {
        let kind = key.kind();
        match kind {
            FieldKind::Null => continue,
            FieldKind::List => {
                return Err(Error::InvalidField {
                    field: field.to_string(),
                    reason: "list values cannot be sorted".to_string(),
                });
            }
            _ => {}
        }
        match seen {
            None => seen = Some(kind),
            Some(expected) if expected != kind => {
                return Err(Error::InvalidField {
                    field: field.to_string(),
                    reason: format!("mixed {expected} and {kind} values in one column"),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
