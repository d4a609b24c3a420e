pub mod cors;
pub mod database;
pub mod routes;
pub mod settings;
