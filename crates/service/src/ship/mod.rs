//! Ship registry: request-side types, predicate building and the record service.

pub mod filter;
pub mod input;
pub mod order;
pub mod repository;
pub mod service;

pub use filter::{Bounds, Clause, Field, Operand, ShipFilter};
pub use input::ShipInput;
pub use order::ShipOrder;
pub use repository::{SeaOrmShipRepository, ShipRepository};
pub use service::ShipService;
