use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Open a pool from `cfg`.
///
/// SQLite pools are pinned to a single connection since in-memory databases
/// are per-connection. Every SQLite connection the pool opens gets
/// `case_sensitive_like`, so LIKE matches case-sensitively as on Postgres.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    if cfg.is_sqlite() {
        opts.max_connections(1)
            .min_connections(1)
            .map_sqlx_sqlite_opts(|o| o.pragma("case_sensitive_like", "ON"));
    } else {
        opts.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }

    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}
