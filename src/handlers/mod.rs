pub mod chat;
pub mod chat_clear;
pub mod chat_guest;
pub mod chat_history;
pub mod current_user;
pub mod health;
pub mod login;
pub mod mood;
pub mod mood_history;
pub mod mood_stats;
pub mod register;
pub mod settings;
pub mod update_profile;
