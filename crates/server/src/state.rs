use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::ship::{SeaOrmShipRepository, ShipService};

pub type Ships = ShipService<SeaOrmShipRepository>;

#[derive(Clone)]
pub struct AppState {
    pub ships: Arc<Ships>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmShipRepository::new(db));
        Self { ships: Arc::new(ShipService::new(repo)) }
    }
}
