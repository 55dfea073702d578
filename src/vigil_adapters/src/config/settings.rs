use ::config::{
    Config, ConfigError, Environment, File,
    builder::{ConfigBuilder, DefaultState},
};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants;
use crate::session::SessionConfig;

/// Service configuration.
///
/// Layering, lowest priority first: built-in defaults, an optional
/// `config/default.toml` file, then `VIGIL__`-prefixed environment variables
/// (`__` as the section separator, e.g. `VIGIL__POSTGRES__URL`). The Postgres
/// URL and session secret have no default and must come from the file or the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub session: SessionSettings,
    pub guard: GuardSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    pub assets_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub secret: Secret<String>,
    pub cookie_name: String,
    pub remember_ttl_seconds: i64,
    pub absolute_cap_seconds: i64,
    pub session_ttl_seconds: i64,
}

impl From<&SessionSettings> for SessionConfig {
    fn from(settings: &SessionSettings) -> Self {
        SessionConfig {
            cookie_name: settings.cookie_name.clone(),
            secret: settings.secret.clone(),
            remember_ttl_seconds: settings.remember_ttl_seconds,
            absolute_cap_seconds: settings.absolute_cap_seconds,
            session_ttl_seconds: settings.session_ttl_seconds,
        }
    }
}

/// Paths excluded from session revalidation, plus where revoked sessions are
/// redirected. Explicit configuration, never inferred from the route table.
#[derive(Debug, Clone, Deserialize)]
pub struct GuardSettings {
    pub exempt_path_prefixes: Vec<String>,
    pub login_path: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("VIGIL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("application.address", constants::prod::APP_ADDRESS)?
        .set_default("application.assets_dir", constants::prod::ASSETS_DIR)?
        .set_default("redis.host_name", "127.0.0.1")?
        .set_default("session.cookie_name", "vigil_session")?
        .set_default("session.remember_ttl_seconds", 7 * 24 * 60 * 60_i64)?
        .set_default("session.absolute_cap_seconds", 30 * 24 * 60 * 60_i64)?
        .set_default("session.session_ttl_seconds", 12 * 60 * 60_i64)?
        .set_default(
            "guard.exempt_path_prefixes",
            vec!["/account/login", "/account/register", "/assets"],
        )?
        .set_default("guard.login_path", "/account/login")
}
