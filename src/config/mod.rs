//! Configuration system for kvconsole.
//!
//! Layers, lowest precedence first:
//!
//! 1. **Built-in defaults**: [`schema::ConsoleConfig::default()`]
//! 2. **User global config**: `~/.kvconsole/config.toml`
//! 3. **Project local config**: `.kvconsole.toml` in the working directory
//! 4. **Environment variables**: `KVCONSOLE_*`
//!
//! Command-line flags are applied on top by the caller.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::ConsoleConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> ConsoleConfig {
    let layers = [global_config_path(), project_config_path()]
        .into_iter()
        .filter_map(load_toml_layer);
    let mut config = layer_configs(layers);

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    config
}

/// Read one config file as a raw TOML table. Missing or malformed files
/// yield `None`.
fn load_toml_layer(path: Option<PathBuf>) -> Option<toml::Table> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    parse_layer(&content)
}

/// Parse a layer, rejecting files whose values do not fit the schema.
fn parse_layer(content: &str) -> Option<toml::Table> {
    let table: toml::Table = content.parse().ok()?;
    toml::Value::Table(table.clone())
        .try_into::<ConsoleConfig>()
        .ok()?;
    Some(table)
}

/// Stack `layers` over the built-in defaults, lowest precedence first.
///
/// Only the keys a layer actually sets replace what lies below it.
fn layer_configs(layers: impl IntoIterator<Item = toml::Table>) -> ConsoleConfig {
    let Ok(toml::Value::Table(mut merged)) = toml::Value::try_from(ConsoleConfig::default())
    else {
        return ConsoleConfig::default();
    };

    for layer in layers {
        merge_tables(&mut merged, layer);
    }

    toml::Value::Table(merged).try_into().unwrap_or_default()
}

/// Deep-merge `overlay` into `base`. Nested tables merge key by key; any
/// other value replaces the one below.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(overlay_table) => {
                if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                    merge_tables(base_table, overlay_table);
                } else {
                    base.insert(key, toml::Value::Table(overlay_table));
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.kvconsole/config.toml`
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kvconsole").join("config.toml"))
}

/// `.kvconsole.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".kvconsole.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `KVCONSOLE_*` overrides read through `lookup`.
///
/// - `KVCONSOLE_API_BASE_URL`: API base URL (`/` for same-origin)
/// - `KVCONSOLE_UPSTREAM`: upstream origin for same-origin requests
/// - `KVCONSOLE_ADDR`: console listen address
/// - `KVCONSOLE_OPEN_BROWSER`: open a browser on start
/// - `KVCONSOLE_ACCESS_LOG`: request lines on stdout
/// - `KVCONSOLE_ACTIVITY_LOG`: JSONL activity log
fn apply_env_overrides(config: &mut ConsoleConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("KVCONSOLE_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = lookup("KVCONSOLE_UPSTREAM")
        && !val.is_empty()
    {
        config.api.upstream = val;
    }
    if let Some(val) = lookup("KVCONSOLE_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = lookup("KVCONSOLE_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = lookup("KVCONSOLE_ACCESS_LOG") {
        config.logging.access_log = is_truthy(&val);
    }
    if let Some(val) = lookup("KVCONSOLE_ACTIVITY_LOG") {
        config.logging.activity_log = is_truthy(&val);
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.kvconsole/config.toml`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    write_default_config(&path, force)?;
    Ok(path)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    fs::write(path, ConsoleConfig::default_toml()).context("failed to write config file")?;
    Ok(())
}

/// The effective configuration as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
