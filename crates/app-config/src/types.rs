// In crates/app-config/src/types.rs

use analytics::{MissingPolicy, SortSpec};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    #[serde(default)]
    pub listing: ListingSettings,
    #[serde(default)]
    pub views: ViewsSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let listing = &self.listing;
        if listing.default_page_size == 0 {
            return Err(Error::Invalid("listing.default_page_size must be positive".into()));
        }
        if listing.page_size_options.contains(&0) {
            return Err(Error::Invalid("listing.page_size_options must be positive".into()));
        }
        if !listing.page_size_options.is_empty()
            && !listing.page_size_options.contains(&listing.default_page_size)
        {
            return Err(Error::Invalid(format!(
                "listing.default_page_size ({}) is not one of listing.page_size_options {:?}",
                listing.default_page_size, listing.page_size_options
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ListingSettings {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Page sizes offered by the page-size picker. Empty means any size.
    #[serde(default)]
    pub page_size_options: Vec<usize>,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: Vec::new(),
        }
    }
}

/// Per-view defaults for the list pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub default_sort: Option<SortSpec>,
    /// How range filters treat rows with no value in the filtered column.
    pub missing_values: MissingPolicy,
}

/// A `[views.*]` table as written. Unset keys fall back to the view's own defaults.
#[derive(Deserialize)]
struct ViewTable {
    #[serde(default)]
    default_sort: Option<SortSpec>,
    #[serde(default)]
    missing_values: Option<MissingPolicy>,
}

impl ViewTable {
    fn resolve(self, missing_fallback: MissingPolicy) -> ViewSettings {
        ViewSettings {
            default_sort: self.default_sort,
            missing_values: self.missing_values.unwrap_or(missing_fallback),
        }
    }
}

/// Order lists keep rows with missing values under range filters; the explorer drops them.
#[derive(Deserialize, Debug, Clone)]
pub struct ViewsSettings {
    #[serde(default = "order_view_defaults", deserialize_with = "deserialize_order_view")]
    pub historical_orders: ViewSettings,
    #[serde(default = "order_view_defaults", deserialize_with = "deserialize_order_view")]
    pub filled_orders: ViewSettings,
    #[serde(default = "order_view_defaults", deserialize_with = "deserialize_order_view")]
    pub twap_orders: ViewSettings,
    #[serde(default = "explorer_view_defaults", deserialize_with = "deserialize_explorer_view")]
    pub explorer: ViewSettings,
}

impl Default for ViewsSettings {
    fn default() -> Self {
        Self {
            historical_orders: order_view_defaults(),
            filled_orders: order_view_defaults(),
            twap_orders: order_view_defaults(),
            explorer: explorer_view_defaults(),
        }
    }
}

fn deserialize_order_view<'de, D>(deserializer: D) -> std::result::Result<ViewSettings, D::Error>
where
    D: Deserializer<'de>,
{
    ViewTable::deserialize(deserializer).map(|table| table.resolve(MissingPolicy::Include))
}

fn deserialize_explorer_view<'de, D>(deserializer: D) -> std::result::Result<ViewSettings, D::Error>
where
    D: Deserializer<'de>,
{
    ViewTable::deserialize(deserializer).map(|table| table.resolve(MissingPolicy::Exclude))
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
fn default_page_size() -> usize { 20 }
fn order_view_defaults() -> ViewSettings {
    ViewSettings {
        default_sort: None,
        missing_values: MissingPolicy::Include,
    }
}
fn explorer_view_defaults() -> ViewSettings {
    ViewSettings {
        default_sort: None,
        missing_values: MissingPolicy::Exclude,
    }
}
