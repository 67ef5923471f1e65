// In crates/analytics/src/filter.rs

use crate::types::{MembershipMode, MissingPolicy, Predicate};
use core_types::{Error, FieldValue, Record, Result};
use std::collections::BTreeSet;

/// Returns the rows for which every predicate holds.
///
/// All predicates are evaluated for every row, so a type error in any of them
/// surfaces even when an earlier predicate already rejected the row. An empty
/// predicate list keeps every row.
pub fn filter_rows<R: Record + Clone>(rows: &[R], predicates: &[Predicate]) -> Result<Vec<R>> {
    for predicate in predicates {
        predicate.validate()?;
    }

    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        let mut keep = true;
        for predicate in predicates {
            keep &= matches(row, predicate)?;
        }
        if keep {
            kept.push(row.clone());
        }
    }

    tracing::debug!(
        input = rows.len(),
        output = kept.len(),
        predicates = predicates.len(),
        "Filtered rows."
    );
    Ok(kept)
}

/// Evaluates one predicate against one row.
pub fn matches<R: Record>(row: &R, predicate: &Predicate) -> Result<bool> {
    let field = predicate.field();
    let value = row.field(field).ok_or_else(|| Error::unknown_field(field))?;

    if !matches!(predicate, Predicate::Select { .. }) && !row.filterable(field) {
        return Err(Error::InvalidField {
            field: field.to_string(),
            reason: "range columns can only be filtered through their min/max bounds".to_string(),
        });
    }

    match predicate {
        Predicate::Range {
            min, max, missing, ..
        } => match value {
            FieldValue::Null => Ok(*missing == MissingPolicy::Include),
            FieldValue::Number(v) => {
                Ok(min.is_none_or(|min| v >= min) && max.is_none_or(|max| v <= max))
            }
            other => Err(kind_mismatch(field, "a number", &other)),
        },
        Predicate::Select { selected, .. } => {
            let Some(selected) = selected else {
                return Ok(true);
            };
            if value.is_null() {
                return Ok(false);
            }
            if value.kind() != selected.kind() {
                return Err(kind_mismatch(field, &format!("a {} value", selected.kind()), &value));
            }
            Ok(&value == selected)
        }
        Predicate::Membership { values, mode, .. } => {
            if values.is_empty() {
                return Ok(true);
            }
            let row_values: BTreeSet<String> = match value {
                FieldValue::Null => BTreeSet::new(),
                FieldValue::Text(text) => BTreeSet::from([text]),
                FieldValue::List(items) => items.into_iter().collect(),
                other => return Err(kind_mismatch(field, "text or a list of text", &other)),
            };
            let intersects = !row_values.is_disjoint(values);
            Ok(match mode {
                MembershipMode::Include => intersects,
                MembershipMode::Exclude => !intersects,
            })
        }
    }
}

fn kind_mismatch(field: &str, expected: &str, found: &FieldValue) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: format!("expected {expected}, found a {} value", found.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        v: Option<Decimal>,
        pair: &'static str,
        side: &'static str,
        tags: Vec<String>,
    }

    impl Record for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "v" => Some(self.v.into()),
                "pair" => Some(self.pair.into()),
                "side" => Some(self.side.into()),
                "tags" => Some(self.tags.clone().into()),
                _ => None,
            }
        }
    }

    fn row(v: Option<Decimal>, pair: &'static str, side: &'static str) -> Row {
        Row {
            v,
            pair,
            side,
            tags: vec![pair.to_string()],
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(Some(dec!(10)), "BTC", "long"),
            row(Some(dec!(5)), "ETH", "short"),
            row(Some(dec!(20)), "SOL", "long"),
        ]
    }

    #[test]
    fn range_min_keeps_rows_at_or_above() {
        let rows = sample();
        let kept = filter_rows(&rows, &[Predicate::range("v", Some(dec!(6)), None)]).unwrap();
        let values: Vec<_> = kept.iter().map(|r| r.v).collect();
        assert_eq!(values, vec![Some(dec!(10)), Some(dec!(20))]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let rows = sample();
        let kept = filter_rows(&rows, &[Predicate::range("v", Some(dec!(5)), Some(dec!(10)))]).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn missing_value_is_excluded_under_exclude_policy() {
        let rows = vec![row(None, "BTC", "long"), row(Some(dec!(7)), "ETH", "long")];
        let predicate = Predicate::range("v", Some(dec!(1)), None).with_missing(MissingPolicy::Exclude);
        let kept = filter_rows(&rows, &[predicate]).unwrap();
        assert_eq!(kept, vec![rows[1].clone()]);
    }

    #[test]
    fn missing_value_passes_under_include_policy() {
        let rows = vec![row(None, "BTC", "long"), row(Some(dec!(0)), "ETH", "long")];
        let predicate = Predicate::range("v", Some(dec!(1)), None).with_missing(MissingPolicy::Include);
        let kept = filter_rows(&rows, &[predicate]).unwrap();
        assert_eq!(kept, vec![rows[0].clone()]);
    }

    #[test]
    fn select_matches_strictly_and_is_inert_without_selection() {
        let rows = sample();
        let longs = filter_rows(&rows, &[Predicate::select("side", "long")]).unwrap();
        assert_eq!(longs.len(), 2);

        let inert = Predicate::Select {
            field: "side".to_string(),
            selected: None,
        };
        assert_eq!(filter_rows(&rows, &[inert]).unwrap(), rows);
    }

    #[test]
    fn select_never_matches_null() {
        let rows = vec![row(None, "BTC", "long")];
        let kept = filter_rows(&rows, &[Predicate::select("v", dec!(1))]).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn membership_include_and_exclude() {
        let rows = sample();
        let include = Predicate::membership("pair", ["BTC", "SOL"], MembershipMode::Include);
        let kept = filter_rows(&rows, &[include]).unwrap();
        assert_eq!(kept.iter().map(|r| r.pair).collect::<Vec<_>>(), vec!["BTC", "SOL"]);

        let exclude = Predicate::membership("pair", ["BTC", "SOL"], MembershipMode::Exclude);
        let kept = filter_rows(&rows, &[exclude]).unwrap();
        assert_eq!(kept.iter().map(|r| r.pair).collect::<Vec<_>>(), vec!["ETH"]);
    }

    #[test]
    fn membership_on_list_field_tests_intersection() {
        let mut multi = row(Some(dec!(1)), "BTC", "long");
        multi.tags = vec!["BTC".to_string(), "ARB".to_string()];
        let rows = vec![multi, row(Some(dec!(2)), "ETH", "long")];
        let kept = filter_rows(
            &rows,
            &[Predicate::membership("tags", ["ARB"], MembershipMode::Include)],
        )
        .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].pair, "BTC");
    }

    #[test]
    fn empty_membership_selection_is_inert() {
        let rows = sample();
        let none: [&str; 0] = [];
        let kept = filter_rows(&rows, &[Predicate::membership("pair", none, MembershipMode::Include)]).unwrap();
        assert_eq!(kept, rows);
    }

    #[test]
    fn predicates_combine_with_and() {
        let rows = sample();
        let predicates = [
            Predicate::select("side", "long"),
            Predicate::range("v", None, Some(dec!(15))),
        ];
        let kept = filter_rows(&rows, &predicates).unwrap();
        assert_eq!(kept, vec![rows[0].clone()]);

        // Every excluded row fails at least one predicate.
        for excluded in rows.iter().filter(|r| !kept.contains(r)) {
            let passes_all = predicates.iter().all(|p| matches(excluded, p).unwrap());
            assert!(!passes_all);
        }
    }

    #[test]
    fn range_on_text_field_fails_fast() {
        let rows = sample();
        let err = filter_rows(&rows, &[Predicate::range("pair", Some(dec!(1)), None)]).unwrap_err();
        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "pair"));
    }

    #[test]
    fn type_error_surfaces_even_after_an_earlier_rejection() {
        let rows = sample();
        let predicates = [
            Predicate::select("side", "nobody"),
            Predicate::range("side", Some(dec!(1)), None),
        ];
        assert!(filter_rows(&rows, &predicates).is_err());
    }

    #[test]
    fn unknown_field_is_reported() {
        let rows = sample();
        let err = filter_rows(&rows, &[Predicate::select("nope", "x")]).unwrap_err();
        assert_eq!(err, Error::unknown_field("nope"));
    }

    #[test]
    fn explorer_range_columns_reject_range_filters() {
        use core_types::PerpDexSummary;

        let dex = PerpDexSummary {
            perpdex: "kwenta".to_string(),
            pairs: vec!["ETH".to_string()],
            volume_24h: None,
            traders_24h: None,
            open_interest: None,
            min_fee: Some(dec!(0.01)),
            max_fee: Some(dec!(0.10)),
            min_leverage: None,
            max_leverage: None,
            listed_at: None,
        };
        let rows = vec![dex];

        let err = filter_rows(&rows, &[Predicate::range("fee", None, Some(dec!(0.05)))]).unwrap_err();
        assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "fee"));
        let leverage = Predicate::membership("leverage", ["10"], MembershipMode::Include);
        assert!(filter_rows(&rows, &[leverage]).is_err());

        // The bound columns filter normally, and select reads the lower bound.
        let by_bound = filter_rows(&rows, &[Predicate::range("min_fee", None, Some(dec!(0.05)))]).unwrap();
        assert_eq!(by_bound.len(), 1);
        let selected = filter_rows(&rows, &[Predicate::select("fee", dec!(0.01))]).unwrap();
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn select_kind_mismatch_is_reported() {
        let rows = sample();
        assert!(filter_rows(&rows, &[Predicate::select("v", "10")]).is_err());
    }
}
