use crate::common::env::FromEnv;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::Deref;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::Level;

pub struct AppSettings {
    pub level: Level,
    pub app_host: IpAddr,
    pub app_port: u16,

    pub database_url: String,
    pub db_max_connections: usize,
    pub db_wait_timeout: Duration,

    pub store_write_attempts: u32,
    pub store_retry_backoff: Duration,
}

impl AppSettings {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();

        let level = Level::from_env_or("LOG_LEVEL", Level::INFO)?;
        let app_host = IpAddr::from_env_or("APP_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let app_port = u16::from_env_or("APP_PORT", 5000)?;

        let database_url =
            String::from_env_or("DATABASE_URL", "sqlite://arena.db?mode=rwc".to_owned())?;
        let db_max_connections = usize::from_env_or("DB_MAX_CONNECTIONS", 8)?;
        let db_wait_timeout_secs = u64::from_env_or("DB_WAIT_TIMEOUT_SECS", 5)?;
        let db_wait_timeout = Duration::from_secs(db_wait_timeout_secs);

        let store_write_attempts = u32::from_env_or("STORE_WRITE_ATTEMPTS", 3)?.max(1);
        let store_retry_backoff_ms = u64::from_env_or("STORE_RETRY_BACKOFF_MS", 50)?;
        let store_retry_backoff = Duration::from_millis(store_retry_backoff_ms);

        Ok(AppSettings {
            level,
            app_host,
            app_port,

            database_url,
            db_max_connections,
            db_wait_timeout,

            store_write_attempts,
            store_retry_backoff,
        })
    }

    pub fn get() -> &'static AppSettings {
        settings()
    }
}

pub fn settings() -> &'static AppSettings {
    static SETTINGS: LazyLock<AppSettings> =
        LazyLock::new(|| AppSettings::load_from_env().expect("Failed to load settings"));
    SETTINGS.deref()
}
