use std::env;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Source of raw configuration values, keyed by environment variable name.
trait Lookup {
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

fn env_opt(source: &dyn Lookup, key: &str) -> Option<String> {
    source.get(key).filter(|s| !s.is_empty())
}

fn env_or(source: &dyn Lookup, key: &str, default: &str) -> String {
    env_opt(source, key).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T>(source: &dyn Lookup, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match env_opt(source, key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Invalid value for {}: '{}', using default {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub dashboard: DashboardConfig,
    pub probe: ProbeSettings,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key: &str| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Missing, empty, or
    /// unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let source: &dyn Lookup = &lookup;
        Self {
            server: ServerConfig::from_source(source),
            database: DatabaseConfig::from_source(source),
            dashboard: DashboardConfig::from_source(source),
            probe: ProbeSettings::from_source(source),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  database:  {}@{}:{}/{} (pool={})",
            self.database.user,
            self.database.host,
            self.database.port,
            self.database.name,
            self.database.max_connections
        );
        tracing::info!("  dashboard: api_url={}", self.dashboard.api_url);
        tracing::info!(
            "  probe:     max_retries={}, interval={}s",
            self.probe.max_retries,
            self.probe.interval_secs
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_source(s: &dyn Lookup) -> Self {
        Self {
            host: env_or(s, "HOST", "0.0.0.0"),
            port: env_parsed(s, "PORT", 8000),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── MySQL ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    fn from_source(s: &dyn Lookup) -> Self {
        Self {
            host: env_or(s, "DB_HOST", "mysql"),
            port: env_parsed(s, "DB_PORT", 3306),
            user: env_or(s, "DB_USER", "app_user"),
            password: env_or(s, "DB_PASSWORD", "app_password"),
            name: env_or(s, "DB_NAME", "app_db"),
            max_connections: env_parsed(s, "DB_MAX_CONNECTIONS", 5),
        }
    }

    /// `host:port` for log lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"********")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

// ── Dashboard ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the items API, without the trailing slash.
    pub api_url: String,
}

impl DashboardConfig {
    fn from_source(s: &dyn Lookup) -> Self {
        Self {
            api_url: env_or(s, "FASTAPI_URL", "http://fastapi:8000")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

// ── Readiness probing ─────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    pub max_retries: u32,
    pub interval_secs: f64,
}

impl ProbeSettings {
    pub const DEFAULT_MAX_RETRIES: u32 = 30;
    pub const DEFAULT_INTERVAL_SECS: f64 = 2.0;

    fn from_source(s: &dyn Lookup) -> Self {
        let max_retries = env_parsed(s, "PROBE_MAX_RETRIES", Self::DEFAULT_MAX_RETRIES);
        let interval_secs = env_parsed(s, "PROBE_INTERVAL_SECS", Self::DEFAULT_INTERVAL_SECS);
        Self {
            max_retries: if max_retries == 0 {
                Self::DEFAULT_MAX_RETRIES
            } else {
                max_retries
            },
            interval_secs: if interval_secs > 0.0
                && std::time::Duration::try_from_secs_f64(interval_secs).is_ok()
            {
                interval_secs
            } else {
                Self::DEFAULT_INTERVAL_SECS
            },
        }
    }

    /// Apply command-line overrides. Values are not validated here; the
    /// prober's config constructor rejects zero retries or intervals.
    pub fn with_overrides(self, max_retries: Option<u32>, interval_secs: Option<f64>) -> Self {
        Self {
            max_retries: max_retries.unwrap_or(self.max_retries),
            interval_secs: interval_secs.unwrap_or(self.interval_secs),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            interval_secs: Self::DEFAULT_INTERVAL_SECS,
        }
    }
}
