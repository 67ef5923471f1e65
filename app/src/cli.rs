// In app/src/cli.rs

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use core_types::{FieldKind, FieldValue, SortDirection};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Filters, sorts and pages Copin Analyzer list data.")]
pub struct Cli {
    /// Directory holding `base.toml` and environment overrides.
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: PathBuf,

    /// Log at debug level regardless of the configured level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs one list view over a JSON array of rows and prints the page.
    List(ListArgs),

    /// Classifies promotional events and prints the visible ones in display order.
    Events {
        /// JSON array of event windows.
        #[arg(short, long)]
        input: PathBuf,

        /// Evaluate at this instant (RFC 3339) instead of the wall clock.
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    HistoricalOrders,
    FilledOrders,
    TwapOrders,
    Explorer,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, value_enum)]
    pub view: View,

    /// JSON array of rows for the chosen view.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Comma separated pairs to keep (or drop with --exclude-pairs).
    #[arg(long, value_delimiter = ',')]
    pub pairs: Vec<String>,

    #[arg(long)]
    pub exclude_pairs: bool,

    /// Numeric range, e.g. `size_usd=1000..` or `min_fee=..0.05`.
    #[arg(long = "range", value_parser = parse_range)]
    pub ranges: Vec<RangeArg>,

    /// Exact match, e.g. `side=long`.
    #[arg(long = "select", value_parser = parse_select)]
    pub selects: Vec<SelectArg>,

    /// Column to sort by; defaults to the view's configured sort.
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, value_parser = parse_direction)]
    pub direction: Option<SortDirection>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size; defaults to `listing.default_page_size`.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg {
    pub field: String,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectArg {
    pub field: String,
    pub raw: String,
}

fn split_assignment(input: &str) -> Result<(&str, &str), String> {
    let (field, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected `field=value`, got `{input}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{input}`"));
    }
    Ok((field, value.trim()))
}

fn parse_bound(raw: &str) -> Result<Option<Decimal>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .map(Some)
        .map_err(|e| format!("`{raw}` is not a number: {e}"))
}

pub fn parse_range(input: &str) -> Result<RangeArg, String> {
    let (field, bounds) = split_assignment(input)?;
    let (min, max) = bounds
        .split_once("..")
        .ok_or_else(|| format!("expected `min..max` in `{input}`"))?;
    Ok(RangeArg {
        field: field.to_string(),
        min: parse_bound(min.trim())?,
        max: parse_bound(max.trim())?,
    })
}

pub fn parse_select(input: &str) -> Result<SelectArg, String> {
    let (field, raw) = split_assignment(input)?;
    Ok(SelectArg {
        field: field.to_string(),
        raw: raw.to_string(),
    })
}

pub fn parse_direction(input: &str) -> Result<SortDirection, String> {
    match input.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortDirection::Asc),
        "desc" => Ok(SortDirection::Desc),
        other => Err(format!("unknown sort direction `{other}` (use asc or desc)")),
    }
}

/// Interprets a command-line value as the kind the column actually holds.
pub fn coerce_value(raw: &str, kind: FieldKind) -> Result<FieldValue, String> {
    match kind {
        FieldKind::Number => Decimal::from_str(raw)
            .map(FieldValue::Number)
            .map_err(|e| format!("`{raw}` is not a number: {e}")),
        FieldKind::Bool => bool::from_str(raw)
            .map(FieldValue::Bool)
            .map_err(|_| format!("`{raw}` is not true or false")),
        FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw)
            .map(|dt| FieldValue::Timestamp(dt.with_timezone(&Utc)))
            .map_err(|e| format!("`{raw}` is not an RFC 3339 timestamp: {e}")),
        FieldKind::Null | FieldKind::Text | FieldKind::List => Ok(FieldValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_open_and_closed_ranges() {
        assert_eq!(
            parse_range("size_usd=1000..").unwrap(),
            RangeArg {
                field: "size_usd".into(),
                min: Some(dec!(1000)),
                max: None
            }
        );
        let fee = parse_range("min_fee=0.01..0.05").unwrap();
        assert_eq!((fee.min, fee.max), (Some(dec!(0.01)), Some(dec!(0.05))));
        let pnl = parse_range("closed_pnl=-50..").unwrap();
        assert_eq!(pnl.min, Some(dec!(-50)));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(parse_range("size_usd").is_err());
        assert!(parse_range("=1..2").is_err());
        assert!(parse_range("size_usd=1-2").is_err());
        assert!(parse_range("size_usd=abc..").is_err());
    }

    #[test]
    fn coerces_values_by_column_kind() {
        assert_eq!(coerce_value("12.5", FieldKind::Number), Ok(FieldValue::Number(dec!(12.5))));
        assert_eq!(coerce_value("true", FieldKind::Bool), Ok(FieldValue::Bool(true)));
        assert_eq!(coerce_value("123", FieldKind::Text), Ok(FieldValue::from("123")));
        assert!(coerce_value("yes", FieldKind::Bool).is_err());
    }

    #[test]
    fn parses_a_full_list_command() {
        let cli = Cli::try_parse_from([
            "copin",
            "list",
            "--view",
            "explorer",
            "--input",
            "dexes.json",
            "--pairs",
            "BTC,ETH",
            "--exclude-pairs",
            "--range",
            "volume_24h=1000..",
            "--select",
            "perpdex=gmx",
            "--sort",
            "fee",
            "--direction",
            "asc",
            "--limit",
            "10",
        ])
        .unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected the list command");
        };
        assert_eq!(args.view, View::Explorer);
        assert_eq!(args.pairs, vec!["BTC", "ETH"]);
        assert!(args.exclude_pairs);
        assert_eq!(args.ranges.len(), 1);
        assert_eq!(args.selects[0].raw, "gmx");
        assert_eq!(args.direction, Some(SortDirection::Asc));
        assert_eq!(args.page, 1);
        assert_eq!(args.limit, Some(10));
    }

    #[test]
    fn parses_events_command_with_fixed_clock() {
        let cli = Cli::try_parse_from(["copin", "events", "-i", "events.json", "--now", "2024-06-15T12:00:00Z"]).unwrap();
        assert!(matches!(cli.command, Commands::Events { now: Some(_), .. }));
        assert_eq!(cli.config_dir, PathBuf::from("config"));
    }
}
