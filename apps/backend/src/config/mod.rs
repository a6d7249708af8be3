//! Application configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// Bounds for the session coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Deadline applied to every store call; an elapsed deadline surfaces
    /// as a transient failure rather than hanging the critical section.
    pub store_timeout: Duration,
    /// How many times a commit is retried after an optimistic-lock or
    /// timeout failure before the error is surfaced.
    pub commit_retry_limit: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_millis(2000),
            commit_retry_limit: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub capacity: u64,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub coordinator: CoordinatorConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            coordinator: CoordinatorConfig {
                store_timeout: Duration::from_millis(var_or("STORE_TIMEOUT_MS", 2000u64)?),
                commit_retry_limit: var_or("COMMIT_RETRY_LIMIT", 3u32)?,
            },
            cache: CacheConfig {
                capacity: var_or("SNAPSHOT_CACHE_CAPACITY", 1024u64)?,
                ttl: Duration::from_secs(var_or("SNAPSHOT_CACHE_TTL_SECS", 30u64)?),
            },
        })
    }
}

/// Parse an environment variable, falling back to `default` when unset.
/// A set-but-malformed value is a configuration error, not a silent default.
fn var_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| AppError::config(format!("invalid {name}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}
