pub mod config;
pub mod trim;

pub use config::Config;
pub use trim::{trim_params, trim_str};
