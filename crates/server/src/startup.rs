use std::{env, net::SocketAddr};

use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present and valid, environment variables otherwise.
fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config.toml unavailable; falling back to environment");
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            let mut cfg = AppConfig::default();
            cfg.server.host = host;
            cfg.server.port = port;
            cfg.database = DatabaseConfig::from_env();
            cfg.database.validate()?;
            Ok(cfg)
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate and wrap everything the handlers need.
pub async fn build_app(db_cfg: &DatabaseConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(db_cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(AppState::new(db), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    let app = build_app(&cfg.database).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting starfleet server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
