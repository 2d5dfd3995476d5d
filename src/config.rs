//! Runtime configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use uuid::Uuid;

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SAVE_AS_NEW_SUFFIX: &str = " (Edited)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Appended to a design's name by save-as-new.
    pub save_as_new_suffix: String,
    /// Identity the CLI signs in as.
    pub user_id: Option<Uuid>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            save_as_new_suffix: DEFAULT_SAVE_AS_NEW_SUFFIX.to_owned(),
            user_id: None,
        }
    }
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `DATABASE_URL`: Postgres connection string
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `SAVE_AS_NEW_SUFFIX`: default `" (Edited)"`
    /// - `ROOMPLAN_USER_ID`: UUID of the signed-in user
    ///
    /// Unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
            db_max_connections: env_parse(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            save_as_new_suffix: lookup("SAVE_AS_NEW_SUFFIX").unwrap_or_else(|| DEFAULT_SAVE_AS_NEW_SUFFIX.to_owned()),
            user_id: lookup("ROOMPLAN_USER_ID").and_then(|v| v.trim().parse().ok()),
        }
    }
}

fn env_parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
