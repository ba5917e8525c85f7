pub mod chat_repository;
pub mod mood_repository;
pub mod settings_repository;
pub mod user_repository;
