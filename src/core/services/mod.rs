pub mod auth_service;
pub mod connector_service;
pub mod types;
