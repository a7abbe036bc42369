use std::env;

use log::LevelFilter;

const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_level: lookup("LOG_LEVEL")
                .and_then(|level| level.trim().parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
