use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://umc.dutchtogether.com".to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
