// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ListingSettings, Settings, ViewSettings, ViewsSettings};

/// Loads the application settings from the `config/` directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from `dir`.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_layered(dir, &environment)
}

fn load_layered(dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name(&dir.join("base").to_string_lossy()))
        .add_source(File::with_name(&dir.join(environment).to_string_lossy()).required(false))
        // e.g. `APP_LISTING__DEFAULT_PAGE_SIZE=50`
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

/// Parses settings from an in-memory TOML document.
pub fn parse_settings(toml: &str) -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
