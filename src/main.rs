//! Entry Directory Server
//!
//! Main entry point that wires all crates together and starts the server.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use entry_core::config::AppConfig;
use entry_core::error::AppError;
use entry_database::DatabasePool;

/// Command-line flags; each one overrides the matching config value.
#[derive(Debug, Parser)]
#[command(name = "entry-server", version, about = "Entry directory JSON API")]
struct Args {
    /// Environment name, selects `config/{env}.toml`
    #[arg(long, env = "ENTRY_ENV", default_value = "development")]
    env: String,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL DSN
    #[arg(long = "db-dsn", env = "ENTRY_DB_DSN", hide_env_values = true)]
    db_dsn: Option<String>,

    /// Directory holding the TOML configuration files
    #[arg(long = "config-dir", default_value = "config")]
    config_dir: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then apply flag overrides.
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&args.config_dir, &args.env)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dsn) = &args.db_dsn {
        config.database.url = dsn.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %config.server.env,
        "Starting entry directory"
    );

    let db = DatabasePool::connect(&config.database).await?;
    db.health_check().await?;
    entry_database::migration::run_migrations(db.pool()).await?;

    entry_api::run_server(config, db).await
}
