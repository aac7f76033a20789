//! Terminal commands: `health`, `config show | init`, `log`.
use anyhow::Result;
use colored::Colorize;

use crate::activity::{ActivityEntry, ActivityLog, Outcome, default_log_path};
use crate::api::{ConfigApi, UreqTransport};
use crate::config::{self, ConsoleConfig};

// ---------------------------------------------------------------------------
// kvconsole health
// ---------------------------------------------------------------------------

pub fn run_health(config: &ConsoleConfig) -> Result<()> {
    println!("{}", "kvconsole Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.kvconsole/config.toml found"
        } else {
            "not found (run `kvconsole config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".kvconsole.toml found"
        } else {
            "none (optional)"
        },
    );

    let transport = UreqTransport::new(&config.api.upstream);
    let api = ConfigApi::new(&config.api.base_url, transport);
    print_health_item("API base", true, api.base_label());
    print_health_item("Upstream", true, api.transport().upstream());

    match api.health() {
        Ok(_) => print_health_item("Config service", true, "reachable"),
        Err(err) => print_health_item("Config service", false, &err.to_string()),
    }

    let log_path = default_log_path();
    let log_exists = log_path.as_ref().map(|p| p.exists()).unwrap_or(false);
    print_health_item(
        "Activity log",
        log_exists,
        &if !config.logging.activity_log {
            "disabled".to_string()
        } else if log_exists {
            format!("{} entries", ActivityLog::open_default(true).read_all().len())
        } else {
            "no log file yet".to_string()
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<18} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// kvconsole config show | init
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective kvconsole Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.kvconsole/config.toml", global_exists);
    print_source(".kvconsole.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "KVCONSOLE_* environment variables".dimmed());

    Ok(())
}

fn print_source(name: &str, found: bool) {
    if found {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Wrote default config to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// kvconsole log
// ---------------------------------------------------------------------------

pub fn run_log(limit: usize) -> Result<()> {
    let log = ActivityLog::open_default(true);
    let entries = log.read_recent(limit);

    if entries.is_empty() {
        println!("{}", "No console activity recorded yet.".yellow());
        return Ok(());
    }

    println!("{}", "Recent Console Activity".bold().cyan());
    println!("{}", "=".repeat(72));
    for entry in &entries {
        println!("{}", format_entry(entry));
    }

    Ok(())
}

fn format_entry(entry: &ActivityEntry) -> String {
    let time = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| entry.timestamp.clone());

    let target = match (&entry.env, &entry.key) {
        (Some(env), Some(key)) => format!("{env}/{key}"),
        (Some(env), None) => env.clone(),
        (None, Some(key)) => key.clone(),
        (None, None) => "-".to_string(),
    };

    let outcome = match entry.outcome {
        Outcome::Success => entry.outcome.to_string().green(),
        Outcome::Error => entry.outcome.to_string().red(),
        Outcome::Rejected => entry.outcome.to_string().yellow(),
    };

    let latency = entry
        .latency_ms
        .map(|ms| format!(" ({ms} ms)"))
        .unwrap_or_default();

    format!(
        "  {} {:<8} {:<24} {:<8} {}{}",
        time.dimmed(),
        entry.action,
        target,
        outcome,
        entry.message,
        latency.dimmed()
    )
}
