pub mod routes;
pub mod startup;
pub mod state;
pub mod errors;
pub mod metrics;
pub mod openapi;

pub use startup::run;
