//! Direct sea-orm access, one module per table.

pub mod ship_store;
