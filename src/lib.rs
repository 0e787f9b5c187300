pub mod config;
pub mod fetcher;
pub mod locale;
pub mod models;
pub mod processor;
pub mod render;
