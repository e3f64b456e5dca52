use std::path::PathBuf;

use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;

/// Run settings: defaults, then an optional `ddo.toml`, then `DDO_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub html_dir: PathBuf,
    pub output: PathBuf,
    pub db_path: PathBuf,
}

pub fn load() -> Result<Settings> {
    let settings = Config::builder()
        .set_default("html_dir", "./ddo_html/")?
        .set_default("output", "ddo_entries.json")?
        .set_default("db_path", "data/ddo.sqlite")?
        .add_source(config::File::with_name("ddo").required(false))
        .add_source(config::Environment::with_prefix("DDO"))
        .build()
        .context("Failed to build settings")?;
    settings
        .try_deserialize()
        .context("Invalid settings")
}
