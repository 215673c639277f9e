//! Secondary indexes backing the most common list filters and sort keys.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_ship::Ship;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Ship); 4] = [
    ("idx_ship_ship_type", Ship::ShipType),
    ("idx_ship_prod_date", Ship::ProdDate),
    ("idx_ship_speed", Ship::Speed),
    ("idx_ship_rating", Ship::Rating),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Ship::Table)
                        .col(col)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).table(Ship::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
