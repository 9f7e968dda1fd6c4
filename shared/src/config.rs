use anyhow::{Context, Result};
use std::{env, str::FromStr};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub reminder: ReminderConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: env::var("REDIS_HOST")?,
            port: env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let reminder = ReminderConfig {
            enabled: var_or("REMINDER_ENABLED", true)?,
            hour: var_or("REMINDER_HOUR", 10)?,
            minute: var_or("REMINDER_MINUTE", 0)?,
        };
        Ok(Self {
            database,
            redis,
            auth,
            reminder,
        })
    }
}

// 任意の環境変数。未設定ならデフォルト値を使い、値が壊れている場合だけエラーにする
fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(v) => v.parse().with_context(|| format!("invalid value for {key}: {v}")),
        Err(_) => Ok(default),
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: 10,
            minute: 0,
        }
    }
}
