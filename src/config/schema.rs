/// Configuration schema and defaults for kvconsole.
///
/// Sections: `[api]`, `[server]`, `[logging]`. Every field has a built-in
/// default; config files only need the values they change.
use serde::{Deserialize, Serialize};

/// Top-level kvconsole configuration.
///
/// Maps directly to `~/.kvconsole/config.toml` and `.kvconsole.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Where the configuration service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL prepended to every API path. `/` or empty means same-origin.
    pub base_url: String,
    /// Origin that same-origin requests resolve against, and the target of
    /// the `/configs` + `/health` pass-through proxy.
    pub upstream: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            upstream: "http://localhost:8080".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address of the console.
    pub addr: String,
    /// Open the console in the default browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5173".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Print one line per HTTP request to stdout.
    pub access_log: bool,
    /// Append console actions to `~/.kvconsole/activity.jsonl`.
    pub activity_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            activity_log: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl ConsoleConfig {
    /// Generate the annotated default config file content.
    pub fn default_toml() -> String {
        r#"# kvconsole configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Command-line flags
#   2. Environment variables (KVCONSOLE_*)
#   3. Project config (.kvconsole.toml in current directory)
#   4. User global config (~/.kvconsole/config.toml)
#   5. Built-in defaults

[api]
base_url = "/"                       # "/" = same-origin; or e.g. "http://localhost:8080"
upstream = "http://localhost:8080"   # Target for same-origin requests and the proxy

[server]
addr = "127.0.0.1:5173"
open_browser = true

[logging]
access_log = true                    # Request lines on stdout
activity_log = true                  # ~/.kvconsole/activity.jsonl
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_produces_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.base_url, "/");
        assert_eq!(config.server.addr, "127.0.0.1:5173");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
[api]
base_url = "http://api:8080/"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://api:8080/");
        assert_eq!(config.api.upstream, "http://localhost:8080");
        assert!(config.logging.access_log);
    }

    #[test]
    fn default_toml_parses_back() {
        let config: ConsoleConfig = toml::from_str(&ConsoleConfig::default_toml()).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }
}
