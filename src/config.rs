use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use tracing::info;

const CONFIG_DIR: &str = "config";
const DEFAULT_ENV: &str = "development";

/// Application configuration, loaded from defaults, optional config files and
/// `APP__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expiration: u64,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    #[serde(default)]
    pub auto_migrate: bool,
    /// Comma-separated list of allowed CORS origins; permissive in development
    /// when unset.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    /// Interval between expired hold-invoice purge runs, in seconds.
    #[serde(default = "default_hold_invoice_purge_interval_secs")]
    pub hold_invoice_purge_interval_secs: u64,
    /// Age in hours after which a held invoice is considered expired.
    #[serde(default = "default_hold_invoice_ttl_hours")]
    pub hold_invoice_ttl_hours: i64,
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_min_connections() -> u32 {
    1
}

fn default_db_connect_timeout_secs() -> u64 {
    30
}

fn default_hold_invoice_purge_interval_secs() -> u64 {
    24 * 60 * 60
}

fn default_hold_invoice_ttl_hours() -> i64 {
    72
}

impl AppConfig {
    /// Construct a configuration directly, used by tests and tooling.
    pub fn new(database_url: String, jwt_secret: String, port: u16, environment: String) -> Self {
        Self {
            database_url,
            jwt_secret,
            jwt_expiration: 12 * 60 * 60,
            host: "0.0.0.0".to_string(),
            port,
            environment,
            log_level: "info".to_string(),
            auto_migrate: false,
            cors_allowed_origins: None,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            hold_invoice_purge_interval_secs: default_hold_invoice_purge_interval_secs(),
            hold_invoice_ttl_hours: default_hold_invoice_ttl_hours(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }
}

/// Loads application configuration.
///
/// Layering order: built-in defaults, `config/default`, `config/{env}`, then
/// `APP__*` environment variables. `jwt_secret` has no default on purpose.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://retail_pos.db?mode=rwc")?
        .set_default("jwt_expiration", 12 * 60 * 60)?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 8080)?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", "info")?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    if config.get_string("jwt_secret").is_err() {
        return Err(ConfigError::Message(
            "jwt_secret must be set via APP__JWT_SECRET or a config file".to_string(),
        ));
    }

    config.try_deserialize()
}

/// Initializes tracing using the provided log level as the default filter.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("retail_pos_api={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let _ = fmt().with_env_filter(EnvFilter::new(filter_directive)).try_init();
}
