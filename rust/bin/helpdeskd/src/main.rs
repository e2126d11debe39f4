//! `helpdeskd`: the store IT helpdesk server.
//!
//! Usage:
//!   helpdeskd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/helpdesk/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use helpdesk_core::Module;
use tracing::info;

use config::ServerConfig;

/// Helpdesk server.
#[derive(Parser, Debug)]
#[command(name = "helpdeskd", about = "Store IT helpdesk server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8000")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;

    let core_config = helpdesk_core::ServiceConfig {
        data_dir: Some(data_dir),
        listen: cli.listen.clone(),
        ..Default::default()
    };

    let sql: Arc<dyn helpdesk_sql::SQLStore> = Arc::new(
        helpdesk_sql::SqliteStore::open(&core_config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let blob: Arc<dyn helpdesk_blob::BlobStore> = Arc::new(
        helpdesk_blob::FileStore::open(&core_config.resolve_upload_dir())
            .map_err(|e| anyhow::anyhow!("failed to open upload store: {}", e))?,
    );
    info!(
        "Storage ready: {} / {}",
        core_config.resolve_sqlite_path().display(),
        core_config.resolve_upload_dir().display()
    );

    let auth_config = helpdesk_auth::AuthConfig {
        token_ttl: server_config.jwt.expire_secs,
        ..helpdesk_auth::AuthConfig::new(
            server_config.jwt.secret.clone(),
            server_config.admin.password_hash.clone(),
        )
    };
    let auth = Arc::new(helpdesk_auth::AuthService::new(auth_config));

    let ticket_module = helpdesk_ticket::TicketModule::new(sql, blob, Arc::clone(&auth))
        .map_err(|e| anyhow::anyhow!("failed to initialise ticket module: {}", e))?;
    info!("Ticket module initialized");

    let module_routes = vec![(ticket_module.name(), ticket_module.routes())];
    let app = routes::build_router(auth, module_routes);

    let listener = tokio::net::TcpListener::bind(&core_config.listen).await?;
    info!("Helpdesk server listening on {}", core_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
