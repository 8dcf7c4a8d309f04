//! Sograph Login Bot - Main Entry Point
//!
//! Command-line helper for a Sograph Telegram bot farm: lists persisted
//! sessions and proxies, and drives the browser-based web login flow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sograph_login_bot::browser::{BROWSER_DIR, ensure_browser, login_in_browser};
use sograph_login_bot::config::{PROXIES_PATH, Proxy, Settings, load_proxies};
use sograph_login_bot::sessions::{SESSIONS_DIR, session_names};

/// Browser-automation helper for a Sograph Telegram bot farm.
#[derive(Parser, Debug)]
#[command(name = "sograph_bot")]
#[command(about = "Sograph farm helper: sessions, proxies and web login")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web login flow and print the extracted signature.
    Login {
        /// Authentication URL to open in the emulated browser.
        #[arg(long)]
        url: String,

        /// Proxy specification to route the browser through.
        ///
        /// Overrides the proxies file; when omitted and proxies-from-file is
        /// enabled, the first proxy from the file is used.
        #[arg(long)]
        proxy: Option<String>,
    },

    /// List the names of persisted session files.
    Sessions,

    /// List the loaded proxies in canonical form.
    Proxies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let settings = Settings::from_env().context("Failed to load settings from environment")?;

    debug!(
        "Settings loaded (ref_id: {}, use_proxy_from_file: {})",
        settings.ref_id, settings.use_proxy_from_file
    );

    match args.command {
        Command::Sessions => {
            for name in session_names(SESSIONS_DIR) {
                println!("{name}");
            }
            Ok(())
        }
        Command::Proxies => {
            let proxies = load_proxies(&settings, PROXIES_PATH)
                .context("Failed to load proxies")?;
            for proxy in proxies {
                println!("{proxy}");
            }
            Ok(())
        }
        Command::Login { url, proxy } => run_login(&settings, &url, proxy.as_deref()).await,
    }
}

/// Resolves the proxy, provisions the browser and runs the login flow.
async fn run_login(settings: &Settings, url: &str, proxy_spec: Option<&str>) -> Result<()> {
    let proxy = resolve_proxy(settings, proxy_spec).context("Failed to resolve proxy")?;

    if let Some(proxy) = &proxy {
        info!("Routing browser traffic through {}", proxy);
    }

    let executable = ensure_browser(BROWSER_DIR)
        .await
        .context("Failed to provision browser")?;

    let signature = login_in_browser(&executable, url, proxy.as_ref())
        .await
        .context("Login flow failed")?;

    println!("{signature}");
    Ok(())
}

/// Picks the proxy for a login attempt: an explicit specification wins,
/// otherwise the first entry of the proxies file when enabled.
fn resolve_proxy(settings: &Settings, spec: Option<&str>) -> Result<Option<Proxy>> {
    if let Some(spec) = spec {
        let proxy = spec.parse().context("Invalid proxy specification")?;
        return Ok(Some(proxy));
    }

    let mut proxies = load_proxies(settings, PROXIES_PATH)?;
    if proxies.is_empty() {
        Ok(None)
    } else {
        Ok(Some(proxies.remove(0)))
    }
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
