use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres (node store)
    pub database_url: String,

    // Event payload validation
    pub max_message_length: usize,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            max_message_length: env::var("EVENT_MAX_MESSAGE_LENGTH")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("EVENT_MAX_MESSAGE_LENGTH must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
