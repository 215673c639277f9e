use async_trait::async_trait;
use models::ship::{self, ShipFields};
use sea_orm::DatabaseConnection;

use crate::db::ship_store;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;
use crate::ship::{Clause, ShipOrder};

#[async_trait]
pub trait ShipRepository: Send + Sync {
    async fn list(&self, clauses: &[Clause], order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError>;
    async fn count(&self, clauses: &[Clause]) -> Result<u64, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<ship::Model>, ServiceError>;
    async fn insert(&self, fields: ShipFields) -> Result<ship::Model, ServiceError>;
    async fn update(&self, id: i64, fields: ShipFields) -> Result<ship::Model, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmShipRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShipRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ShipRepository for SeaOrmShipRepository {
    async fn list(&self, clauses: &[Clause], order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        ship_store::list_ships(&self.db, clauses, order, page).await
    }

    async fn count(&self, clauses: &[Clause]) -> Result<u64, ServiceError> {
        ship_store::count_ships(&self.db, clauses).await
    }

    async fn get(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        ship_store::get_ship(&self.db, id).await
    }

    async fn insert(&self, fields: ShipFields) -> Result<ship::Model, ServiceError> {
        ship_store::insert_ship(&self.db, fields).await
    }

    async fn update(&self, id: i64, fields: ShipFields) -> Result<ship::Model, ServiceError> {
        ship_store::update_ship(&self.db, id, fields).await
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        ship_store::delete_ship(&self.db, id).await
    }
}
