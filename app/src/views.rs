// In app/src/views.rs

use analytics::{ListState, MembershipMode, MissingPolicy, Predicate, SortSpec, run_query};
use anyhow::{Context, Result};
use app_config::{Settings, ViewSettings};
use core_types::{FieldKind, FilledOrder, HistoricalOrder, PerpDexSummary, Record, TwapOrder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::cli::{ListArgs, View, coerce_value};

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::HistoricalOrders => "historical_orders",
            View::FilledOrders => "filled_orders",
            View::TwapOrders => "twap_orders",
            View::Explorer => "explorer",
        }
    }

    /// The column the pair picker filters on.
    pub fn pair_field(self) -> &'static str {
        match self {
            View::Explorer => "pairs",
            _ => "pair",
        }
    }

    pub fn settings(self, settings: &Settings) -> &ViewSettings {
        let views = &settings.views;
        match self {
            View::HistoricalOrders => &views.historical_orders,
            View::FilledOrders => &views.filled_orders,
            View::TwapOrders => &views.twap_orders,
            View::Explorer => &views.explorer,
        }
    }
}

/// Handles the logic for the `list` subcommand.
pub fn run_list(args: &ListArgs, settings: &Settings) -> Result<serde_json::Value> {
    match args.view {
        View::HistoricalOrders => run_view::<HistoricalOrder>(args, settings),
        View::FilledOrders => run_view::<FilledOrder>(args, settings),
        View::TwapOrders => run_view::<TwapOrder>(args, settings),
        View::Explorer => run_view::<PerpDexSummary>(args, settings),
    }
}

fn run_view<R>(args: &ListArgs, settings: &Settings) -> Result<serde_json::Value>
where
    R: Record + Clone + Serialize + DeserializeOwned,
{
    let rows: Vec<R> = read_rows(&args.input)?;
    let view_settings = args.view.settings(settings);
    tracing::info!(view = args.view.name(), rows = rows.len(), "Loaded rows.");

    // --- Build the list state the way the UI would ---
    let mut state = ListState::new(view_settings.default_sort.clone(), settings.listing.default_page_size)?;
    state.set_dataset(args.input.display().to_string());
    state.set_predicates(build_predicates(args, view_settings.missing_values, &rows)?)?;

    match (&args.sort, args.direction) {
        (Some(field), direction) => {
            state.set_sort(Some(SortSpec::new(field.clone(), direction.unwrap_or_default())));
        }
        (None, Some(direction)) => {
            let current = state.sort().cloned();
            if let Some(current) = current {
                state.set_sort(Some(SortSpec::new(current.field, direction)));
            } else {
                tracing::warn!("--direction given without a sort column; ignoring it.");
            }
        }
        (None, None) => {}
    }

    if let Some(limit) = args.limit {
        let options = &settings.listing.page_size_options;
        if !options.is_empty() && !options.contains(&limit) {
            tracing::warn!(limit, ?options, "Page size is not one of the configured options.");
        }
        state.set_limit(limit)?;
    }
    state.set_page(args.page)?;

    // --- Run the pipeline ---
    let page = run_query(&rows, &state.query())?;
    tracing::info!(
        total = page.meta.total,
        page = state.page(),
        total_pages = page.meta.total_pages,
        returned = page.data.len(),
        "List view rendered."
    );

    Ok(serde_json::to_value(&page)?)
}

/// Turns the command-line filters into predicates for one view.
///
/// Select values are typed after the column they target, read from the first
/// row that has a value in it.
pub fn build_predicates<R: Record>(
    args: &ListArgs,
    missing: MissingPolicy,
    rows: &[R],
) -> Result<Vec<Predicate>> {
    let mut predicates = Vec::new();

    if !args.pairs.is_empty() {
        let mode = if args.exclude_pairs {
            MembershipMode::Exclude
        } else {
            MembershipMode::Include
        };
        predicates.push(Predicate::membership(args.view.pair_field(), args.pairs.iter().cloned(), mode));
    }

    for range in &args.ranges {
        predicates.push(Predicate::range(range.field.clone(), range.min, range.max).with_missing(missing));
    }

    for select in &args.selects {
        let kind = column_kind(rows, &select.field);
        let value = coerce_value(&select.raw, kind)
            .map_err(|reason| anyhow::anyhow!("--select {}: {}", select.field, reason))?;
        predicates.push(Predicate::select(select.field.clone(), value));
    }

    Ok(predicates)
}

fn column_kind<R: Record>(rows: &[R], field: &str) -> FieldKind {
    rows.iter()
        .filter_map(|row| row.field(field))
        .map(|value| value.kind())
        .find(|kind| *kind != FieldKind::Null)
        .unwrap_or(FieldKind::Text)
}

pub fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let rows = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse rows from {}", path.display()))?;
    Ok(rows)
}
