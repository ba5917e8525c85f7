pub mod auth_service;
pub mod chat_service;
pub mod mood_service;
