//! Zenestreaming server entry point
//!
//! ```text
//! config/{env}.yaml + .env ──▶ PostgreSQL pool ──▶ stores ──▶ services ──▶ axum
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use zenestreaming::catalog::{CatalogService, PgTrackStore};
use zenestreaming::config::{AppConfig, jwt_secret_from_env};
use zenestreaming::db::Database;
use zenestreaming::gateway::{run_server, state::AppState};
use zenestreaming::logging::init_logging;
use zenestreaming::user_auth::{PgUserStore, UserAuthService};

#[derive(Parser, Debug)]
#[command(name = "zenestreaming", version, about = "Music and podcast catalog API")]
struct Cli {
    /// Config environment, loads config/{env}.yaml
    #[arg(short, long, env = "APP_ENV", default_value = "dev")]
    env: String,

    /// Override gateway.port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.env)?;
    let _log_guard = init_logging(&app_config);
    tracing::info!(env = %cli.env, version = env!("GIT_HASH"), "Starting zenestreaming");

    let jwt_secret = jwt_secret_from_env()?;

    let db = Database::connect(&app_config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;
    db.init_schema()
        .await
        .context("Failed to apply database schema")?;

    let catalog = Arc::new(CatalogService::new(Arc::new(PgTrackStore::new(
        db.pool().clone(),
    ))));
    let user_auth = Arc::new(
        UserAuthService::new(
            Arc::new(PgUserStore::new(db.pool().clone())),
            jwt_secret,
            &app_config.auth,
        )
        .context("Invalid auth configuration")?,
    );
    let state = Arc::new(AppState::new(catalog, user_auth));

    let port = cli.port.unwrap_or(app_config.gateway.port);
    let result = run_server(&app_config.gateway.host, port, state).await;

    db.close().await;
    tracing::info!("Database pool closed");
    result
}
