use anyhow::Result;
use clap::{Parser, Subcommand};

use kvconsole::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "kvconsole")]
#[command(about = "Browser console for a key/value configuration service")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the console page and proxy the service API
    Serve {
        /// Listen address, e.g. 127.0.0.1:5173
        #[arg(long)]
        addr: Option<String>,
        /// API base URL ("/" for same-origin)
        #[arg(long)]
        api_base: Option<String>,
        /// Origin that same-origin requests are sent to
        #[arg(long)]
        upstream: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Check config files and service reachability
    Health,
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show recent console activity
    Log {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.kvconsole/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve {
            addr,
            api_base,
            upstream,
            no_browser,
        } => {
            let mut cfg = config::load();
            if let Some(addr) = addr {
                cfg.server.addr = addr;
            }
            if let Some(base) = api_base {
                cfg.api.base_url = base;
            }
            if let Some(upstream) = upstream {
                cfg.api.upstream = upstream;
            }
            if no_browser {
                cfg.server.open_browser = false;
            }
            web::serve(&cfg)
        }
        Commands::Health => cli::run_health(&config::load()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
        },
        Commands::Log { limit } => cli::run_log(limit),
    }
}
