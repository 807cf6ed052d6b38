pub mod configuration;
pub mod contract;
pub mod domain;
pub mod form_client;
pub mod routes;
pub mod sheets_client;
pub mod startup;
pub mod telemetry;
