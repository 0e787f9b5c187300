pub mod advisor_config;

pub use advisor_config::*;
