/// 엔진 설정
/// 환경 변수에서 읽는다.
/// - JAMBO_STORE: memory(기본) | postgres
/// - DATABASE_URL: postgres 사용 시 필수
/// - JAMBO_DB_MAX_CONNECTIONS: 커넥션 풀 크기 (기본 5)
/// - JAMBO_EVENT_CAPACITY: 이벤트 버퍼 크기 (기본 1024)
// region:    --- Imports
use crate::engine::DEFAULT_EVENT_CAPACITY;
use std::str::FromStr;
use thiserror::Error;

// endregion: --- Imports

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// region:    --- Config Error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("필수 설정이 없습니다: {0}")]
    Missing(&'static str),

    #[error("잘못된 설정 값입니다: {key}={value}")]
    Invalid { key: &'static str, value: String },
}

// endregion: --- Config Error

// region:    --- Engine Config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub store: StoreBackend,
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// 프로세스 환경 변수에서 읽기
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키 조회 함수에서 읽기
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let event_capacity = parse_or(&lookup, "JAMBO_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY)?;
        if event_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "JAMBO_EVENT_CAPACITY",
                value: "0".to_string(),
            });
        }

        let backend = lookup("JAMBO_STORE").unwrap_or_else(|| "memory".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections =
                    parse_or(&lookup, "JAMBO_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
                if max_connections == 0 {
                    return Err(ConfigError::Invalid {
                        key: "JAMBO_DB_MAX_CONNECTIONS",
                        value: "0".to_string(),
                    });
                }
                StoreBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            _ => {
                return Err(ConfigError::Invalid {
                    key: "JAMBO_STORE",
                    value: backend,
                })
            }
        };

        Ok(Self {
            store,
            event_capacity,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

// endregion: --- Engine Config
