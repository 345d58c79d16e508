use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Required PostgreSQL connection string.
pub const DB_URL_VAR: &str = "DB_URL";
/// Optional JSON array of titles inserted at startup.
pub const DATA_SEED_VAR: &str = "ZEROPS_RECIPE_DATA_SEED";
/// Optional flag: drop the `todos` table before creating it.
pub const DROP_TABLE_VAR: &str = "ZEROPS_RECIPE_DROP_TABLE";

/// The server always listens on this port, on all interfaces.
pub const LISTEN_PORT: u16 = 3000;

/// Configuration problems detected at startup. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("database url missing, set the {0} env var")]
    Missing(&'static str),

    #[error("{var} must be a JSON array of strings: {source}")]
    InvalidSeed {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{var} must be a boolean, got '{value}'")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Titles inserted into the table at startup.
    pub seeds: Vec<String>,
    /// Whether to drop the table before (re)creating it.
    pub drop_table: bool,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Per-statement repository deadline in seconds (default: `10`).
    pub statement_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default    |
    /// |----------------------------|------------|
    /// | `DB_URL`                   | (required) |
    /// | `ZEROPS_RECIPE_DATA_SEED`  | `[]`       |
    /// | `ZEROPS_RECIPE_DROP_TABLE` | `false`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`       |
    /// | `STATEMENT_TIMEOUT_SECS`   | `10`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DB_URL_VAR).ok_or(ConfigError::Missing(DB_URL_VAR))?;

        let seeds = match lookup(DATA_SEED_VAR) {
            Some(raw) => parse_seeds(&raw)?,
            None => Vec::new(),
        };

        let drop_table = match lookup(DROP_TABLE_VAR) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBool {
                var: DROP_TABLE_VAR,
                value: raw,
            })?,
            None => false,
        };

        let request_timeout_secs = parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let statement_timeout_secs = parse_secs(&lookup, "STATEMENT_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            seeds,
            drop_table,
            request_timeout_secs,
            statement_timeout_secs,
        })
    }

    /// Address the server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), LISTEN_PORT)
    }
}

/// `null` is accepted and treated as an empty seed list.
fn parse_seeds(raw: &str) -> Result<Vec<String>, ConfigError> {
    serde_json::from_str::<Option<Vec<String>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| ConfigError::InvalidSeed {
            var: DATA_SEED_VAR,
            source,
        })
}

/// Accepts the usual spellings: `1`, `t`, `true`, `0`, `f`, `false`, in
/// lower, upper or title case.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Zero is rejected: it would expire every request or statement at once.
fn parse_secs<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidNumber { var, value: raw }),
        },
        None => Ok(default),
    }
}
