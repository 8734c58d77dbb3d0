use axum_helpers::{CorsConfig, JwtConfig};
use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_optional, env_or_default, server::ServerConfig,
};
use database::postgres::PostgresConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Account created (or promoted) at startup so a fresh deployment has an admin
#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl AdminSeed {
    /// `ADMIN_EMAIL` switches seeding on; `ADMIN_PASSWORD` is then required
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(email) = env_optional("ADMIN_EMAIL") else {
            return Ok(None);
        };
        let password = env_optional("ADMIN_PASSWORD")
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))?;

        Ok(Some(Self {
            email,
            password,
            name: env_or_default("ADMIN_NAME", "Administrator"),
        }))
    }
}

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    /// JSON copies of blog posts, served while the database is down
    pub posts_fallback_dir: PathBuf,
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?, // HOST=0.0.0.0, PORT=8080
            database: PostgresConfig::from_env()?, // DATABASE_URL required
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            posts_fallback_dir: posts_fallback_dir(),
            admin: AdminSeed::from_env()?,
        })
    }
}

fn posts_fallback_dir() -> PathBuf {
    PathBuf::from(env_or_default("POSTS_FALLBACK_DIR", "./data/posts"))
}
