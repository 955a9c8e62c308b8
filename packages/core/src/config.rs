use thiserror::Error;
use tracing::warn;

pub const ACCESS_SECRET_VAR: &str = "JWT_SECRET_ACCESS_TOKEN";
pub const REFRESH_SECRET_VAR: &str = "JWT_SECRET_REFRESH_TOKEN";
pub const API_KEY_VAR: &str = "API_KEY";
pub const USERS_TABLE_VAR: &str = "USERS_TABLE";
pub const BLOGS_TABLE_VAR: &str = "BLOGS_TABLE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
}

/// The two signing secrets. Access and refresh tokens never share a key.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
}

impl AuthConfig {
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.is_empty() {
            return Err(ConfigError::Missing(ACCESS_SECRET_VAR));
        }
        if refresh_secret.is_empty() {
            return Err(ConfigError::Missing(REFRESH_SECRET_VAR));
        }
        if access_secret == refresh_secret {
            warn!("access and refresh tokens are signed with the same secret");
        }

        Ok(AuthConfig {
            access_secret,
            refresh_secret,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        AuthConfig::new(
            required_var(ACCESS_SECRET_VAR)?,
            required_var(REFRESH_SECRET_VAR)?,
        )
    }
}

/// Everything the process reads from its environment, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub api_key: Option<String>,
    pub users_table: Option<String>,
    pub blogs_table: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            auth: AuthConfig::from_env()?,
            api_key: optional_var(API_KEY_VAR),
            users_table: optional_var(USERS_TABLE_VAR),
            blogs_table: optional_var(BLOGS_TABLE_VAR),
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    optional_var(name).ok_or(ConfigError::Missing(name))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
