pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod serializers;
pub mod services;
pub mod state;
pub mod test_helpers;
