use crate::domain::{
    DEFAULT_ALLOWED_DAYS_AHEAD, DEFAULT_ALLOWED_RESERVATION_DURATION, ReservationPolicy,
};
use mockable::Env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/room_booking";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// アプリケーション設定
///
/// 起動時に環境変数から読み込み、実行中は変更しない。
///
/// | 環境変数 | デフォルト |
/// |---|---|
/// | `DATABASE_URL` | `postgres://localhost/room_booking` |
/// | `PORT` | `3000` |
/// | `DATABASE_MAX_CONNECTIONS` | `5` |
/// | `RESERVATION_DAYS_AHEAD_ALLOWED` | `500` |
/// | `RESERVATION_DURATION_ALLOWED` | `30` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub policy: ReservationPolicy,
}

impl AppConfig {
    /// 環境変数から読み込む
    ///
    /// 本番では`mockable::DefaultEnv`、テストでは`MockEnv`を渡す。
    pub fn from_env(env: &impl Env) -> Result<Self, ConfigError> {
        let database_url = env
            .string("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        Ok(Self {
            database_url,
            port: parse_or(env, "PORT", DEFAULT_PORT)?,
            max_connections: parse_or(env, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            policy: ReservationPolicy {
                allowed_days_ahead: parse_or(
                    env,
                    "RESERVATION_DAYS_AHEAD_ALLOWED",
                    DEFAULT_ALLOWED_DAYS_AHEAD,
                )?,
                allowed_reservation_duration: parse_or(
                    env,
                    "RESERVATION_DURATION_ALLOWED",
                    DEFAULT_ALLOWED_RESERVATION_DURATION,
                )?,
            },
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// 未設定ならデフォルト値、設定されていれば前後の空白を除いてパースする
fn parse_or<T: FromStr>(env: &impl Env, key: &'static str, default: T) -> Result<T, ConfigError> {
    match env.string(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
