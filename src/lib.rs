pub mod ai;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod services;
pub mod utility;

pub use error::ApiError;
pub use models::AppState;
