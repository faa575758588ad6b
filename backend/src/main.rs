//! Daily Diet entry point: loads settings, prepares the store and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use daily_diet::inbound::http::health::HealthState;
use daily_diet::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server, load_session_key};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let bind_addr = settings.bind_addr()?;
    let key = load_session_key(settings.session_key_file(), settings.allow_ephemeral_key)?;
    let mut config = ServerConfig::new(key, settings.cookie_secure(), bind_addr);

    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("failed to migrate database")?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_max_size()?))
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
            info!("using PostgreSQL store");
        }
        None => warn!("no database configured; meals are kept in memory only"),
    }

    #[cfg(feature = "metrics")]
    {
        let prometheus = server::build_prometheus()
            .map_err(|message| color_eyre::eyre::eyre!("failed to configure metrics: {message}"))?;
        config = config.with_metrics(Some(prometheus));
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await?;
    Ok(())
}
