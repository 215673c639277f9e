#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::ship::{ShipFields, ShipType};
use sea_orm::{prelude::Date, DatabaseConnection};

/// A fresh, migrated in-memory database. Every call gets its own schema,
/// so tests never observe each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        min_connections: 1,
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// A valid transport ship produced on January 1st of `year`.
pub fn ship_fields(year: i32) -> ShipFields {
    ShipFields {
        name: "Ride".into(),
        planet: "Earth".into(),
        ship_type: ShipType::Transport,
        prod_date: Date::from_ymd_opt(year, 1, 1).expect("valid year"),
        is_used: false,
        speed: 0.5,
        crew_size: 20,
    }
}
