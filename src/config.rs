// region:    --- Imports
use crate::error::AdminError;
use std::env;

// endregion: --- Imports

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// region:    --- Config
/// 서버 설정 (환경 변수)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// 쓰기 API 용 Bearer 토큰. 없으면 쓰기 요청은 모두 거부
    pub admin_token: Option<String>,
    pub init_schema: bool,
    pub log_level: String,
}

impl Config {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, AdminError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 -> 값 조회 함수로부터 설정 생성
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL")
            .ok_or_else(|| AdminError::Config("DATABASE_URL must be set".into()))?;

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AdminError::Config(format!("DB_MAX_CONNECTIONS must be a positive integer: {}", raw))
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let init_schema = match get("INIT_SCHEMA") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AdminError::Config(format!("INIT_SCHEMA must be a boolean: {}", raw)))?,
            None => false,
        };

        Ok(Self {
            database_url,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            admin_token: get("ADMIN_TOKEN"),
            init_schema,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// endregion: --- Config

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, AdminError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn applies_defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/auction")]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.admin_token, None);
        assert!(!cfg.init_schema);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn requires_database_url() {
        assert!(matches!(config(&[]), Err(AdminError::Config(_))));
        assert!(config(&[("DATABASE_URL", "   ")]).is_err());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://db/auction"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("ADMIN_TOKEN", "secret"),
            ("INIT_SCHEMA", "yes"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.admin_token.as_deref(), Some("secret"));
        assert!(cfg.init_schema);
    }

    #[test]
    fn rejects_invalid_numbers_and_flags() {
        assert!(config(&[("DATABASE_URL", "x"), ("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config(&[("DATABASE_URL", "x"), ("INIT_SCHEMA", "maybe")]).is_err());
    }
}
