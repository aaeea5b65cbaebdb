//! Dashboard Admin CLI Server
//!
//! Headless dashboard user administration service, suitable for a systemd
//! unit, a container or a standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/dashboard-admin/config.toml)
//! dashboard-admin
//!
//! # Custom config path
//! dashboard-admin --config /etc/dashboard-admin/config.toml
//!
//! # Override the port
//! dashboard-admin --port 8080
//!
//! # Validate config without starting
//! dashboard-admin --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use dashboard_admin::config::{AppConfig, ConfigError};
use dashboard_admin::server::{init_tracing, ServerHandle, ServerOptions};

/// Dashboard Admin: REST service for admin console accounts.
#[derive(Parser, Debug)]
#[command(
    name = "dashboard-admin",
    version,
    about = "Dashboard user administration service",
    long_about = "Dashboard Admin: REST API for listing, creating, updating \
                  and deleting admin console users.\n\n\
                  Default config: ~/.config/dashboard-admin/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DASHBOARD_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

/// A config that fails to load is fatal in `--check` mode; otherwise the
/// server starts on defaults and the error is reported once tracing is up.
fn resolve_config(
    loaded: Result<AppConfig, ConfigError>,
    check: bool,
) -> Result<(AppConfig, Option<ConfigError>), ConfigError> {
    match loaded {
        Ok(cfg) => Ok((cfg, None)),
        Err(e) if check => Err(e),
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(dashboard_admin::default_config_path);

    let (mut config, load_error) = resolve_config(AppConfig::load(&config_path), cli.check)?;

    // Log level must be settled before tracing starts
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Storage     : {:?}", config.database.backend);
        if config.database.is_sql() {
            println!("   Database    : {}", config.database.connection_url());
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_file() -> Result<AppConfig, ConfigError> {
        AppConfig::load(std::path::Path::new("/nonexistent/dashboard-admin/config.toml"))
    }

    #[test]
    fn check_mode_reports_load_failure() {
        let err = resolve_config(missing_file(), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn serve_mode_falls_back_to_defaults() {
        let (config, load_error) = resolve_config(missing_file(), false).unwrap();
        assert!(matches!(load_error, Some(ConfigError::Read { .. })));
        assert_eq!(config.server.port, AppConfig::default().server.port);
    }

    #[test]
    fn loaded_config_is_kept() {
        let loaded = AppConfig::from_toml_str("[server]\nport = 8080");
        let (config, load_error) = resolve_config(loaded, true).unwrap();
        assert!(load_error.is_none());
        assert_eq!(config.server.port, 8080);
    }
}
