use crate::error::AppError;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Database configuration
    pub database_url: String,
    pub db_max_connections: u32,

    // Escalation thresholds
    pub report_ban_threshold: u32,
    pub spam_ban_threshold: u32,
    pub spam_window_secs: i64,
    pub auto_ban_days: i64,

    // Service configuration
    pub service_name: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8087".to_string())
                .parse()
                .unwrap_or(8087),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Config("DATABASE_URL must be set".to_string()))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
            report_ban_threshold: env::var("REPORT_BAN_THRESHOLD")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            spam_ban_threshold: env::var("SPAM_BAN_THRESHOLD")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            spam_window_secs: env::var("SPAM_WINDOW_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .unwrap_or(3600),
            auto_ban_days: env::var("AUTO_BAN_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .unwrap_or(7),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "moderation-service".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        env::set_var("DATABASE_URL", "postgres://test");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8087);
        assert_eq!(config.report_ban_threshold, 3);
        assert_eq!(config.spam_ban_threshold, 3);
        assert_eq!(config.spam_window_secs, 3600);
        assert_eq!(config.auto_ban_days, 7);
    }
}
