pub mod engine;
pub mod engine_config;
pub mod keyboard;
pub mod notify;
