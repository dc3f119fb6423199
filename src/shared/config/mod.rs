//! Application configuration module
//!
//! Configuration is read from process environment variables (a `.env` file is
//! loaded by the server binary before this runs). Every value except the
//! signing secret has a default suitable for local development.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default bcrypt work factor (matches `bcrypt::DEFAULT_COST`)
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Upper bound on any token lifetime (100 years)
pub const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 3600;

/// Where users, businesses and products are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// PostgreSQL through sqlx
    #[default]
    Postgres,
    /// Process-local maps, lost on restart
    Memory,
}

/// PostgreSQL connection settings
///
/// `url` wins when set; otherwise the parts are handed to the driver as
/// separate fields, so credentials need no escaping.
#[derive(Debug, Clone, Default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl DatabaseSettings {
    /// Whether a URL, or at least a host and database name, is configured
    pub fn is_configured(&self) -> bool {
        self.url.is_some() || (self.host.is_some() && self.name.is_some())
    }
}

/// SMTP settings for the verification mail
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection settings
    pub database: DatabaseSettings,
    /// Which store implementation to run with
    pub store_backend: StoreBackend,
    /// HS256 signing secret shared by access and verification tokens
    pub secret: String,
    /// Lifetime of a bearer access token
    pub access_token_ttl: Duration,
    /// Lifetime of an email verification link
    pub verification_token_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Directory served under `/static`; images go to `<static_dir>/images`
    pub static_dir: PathBuf,
    /// Scheme + host prefix used in returned asset URLs and email links
    pub public_base_url: String,
    /// Edge length, in pixels, of every stored upload
    pub image_size: u32,
    /// Request body cap for upload routes
    pub max_upload_bytes: usize,
    /// Bind host
    pub server_host: String,
    /// Bind port
    pub server_port: u16,
    /// Verification mail delivery; `None` logs the link instead
    pub smtp: Option<SmtpSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                port: 5432,
                ..DatabaseSettings::default()
            },
            store_backend: StoreBackend::Postgres,
            secret: String::new(),
            access_token_ttl: Duration::from_secs(30 * 60),
            verification_token_ttl: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            static_dir: PathBuf::from("static"),
            public_base_url: "http://localhost:8000".to_string(),
            image_size: 200,
            max_upload_bytes: 10 * 1024 * 1024,
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            smtp: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = AppConfig::default();

        let store_backend = match get("DATABASE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "DATABASE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let database = DatabaseSettings {
            url: get("DATABASE_URL"),
            host: get("DB_HOST"),
            port: parse_or("DB_PORT", get("DB_PORT"), defaults.database.port)?,
            user: get("DB_USER"),
            password: get("DB_PASS"),
            name: get("DB_NAME"),
        };

        let smtp = match get("SMTP_HOST") {
            Some(host) => Some(SmtpSettings {
                host,
                port: parse_or("SMTP_PORT", get("SMTP_PORT"), 587)?,
                username: get("SMTP_USERNAME").unwrap_or_default(),
                password: get("SMTP_PASSWORD").unwrap_or_default(),
                from_address: get("EMAIL_FROM").ok_or(ConfigError::MissingValue("EMAIL_FROM"))?,
            }),
            None => None,
        };

        let access_minutes: u64 = parse_or(
            "ACCESS_TOKEN_TTL_MINUTES",
            get("ACCESS_TOKEN_TTL_MINUTES"),
            defaults.access_token_ttl.as_secs() / 60,
        )?;
        let verification_hours: u64 = parse_or(
            "VERIFICATION_TOKEN_TTL_HOURS",
            get("VERIFICATION_TOKEN_TTL_HOURS"),
            defaults.verification_token_ttl.as_secs() / 3600,
        )?;

        let config = AppConfig {
            database,
            store_backend,
            secret: get("SECRET").ok_or(ConfigError::MissingValue("SECRET"))?,
            access_token_ttl: ttl_from("ACCESS_TOKEN_TTL_MINUTES", access_minutes, 60)?,
            verification_token_ttl: ttl_from(
                "VERIFICATION_TOKEN_TTL_HOURS",
                verification_hours,
                3600,
            )?,
            bcrypt_cost: parse_or("BCRYPT_COST", get("BCRYPT_COST"), defaults.bcrypt_cost)?,
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            public_base_url: get("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            image_size: parse_or("UPLOAD_IMAGE_SIZE", get("UPLOAD_IMAGE_SIZE"), defaults.image_size)?,
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                get("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            )?,
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", get("SERVER_PORT"), defaults.server_port)?,
            smtp,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingValue("SECRET"));
        }
        if self.image_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "UPLOAD_IMAGE_SIZE",
                value: "0".to_string(),
            });
        }
        for (key, ttl) in [
            ("ACCESS_TOKEN_TTL_MINUTES", self.access_token_ttl),
            ("VERIFICATION_TOKEN_TTL_HOURS", self.verification_token_ttl),
        ] {
            if ttl.as_secs() > MAX_TTL_SECS {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: format!("{}s", ttl.as_secs()),
                });
            }
        }
        // bcrypt rejects anything outside 4..=31
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if !self.public_base_url.starts_with("http://") && !self.public_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.public_base_url.clone()));
        }
        Ok(())
    }

    /// Directory that holds uploaded images
    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.join("images")
    }
}

/// `count` units of `unit_secs` seconds
///
/// Lifetimes are added to the current UNIX time when tokens are signed, so the
/// result must stay well inside `u64`.
fn ttl_from(key: &'static str, count: u64, unit_secs: u64) -> Result<Duration, ConfigError> {
    count
        .checked_mul(unit_secs)
        .filter(|secs| *secs <= MAX_TTL_SECS)
        .map(Duration::from_secs)
        .ok_or(ConfigError::InvalidValue {
            key,
            value: count.to_string(),
        })
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

/// Builder for AppConfig
///
/// Starts from `AppConfig::default()`; mostly used by tests and tools that
/// wire the application without touching the environment.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the signing secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    /// Choose the store implementation
    pub fn store_backend(mut self, backend: StoreBackend) -> Self {
        self.config.store_backend = backend;
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = Some(url.into());
        self
    }

    /// Set the static asset directory
    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    /// Set the public base URL
    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.public_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the access-token lifetime
    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.access_token_ttl = ttl;
        self
    }

    /// Set the verification-token lifetime
    pub fn verification_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.verification_token_ttl = ttl;
        self
    }

    /// Set the stored image edge length
    pub fn image_size(mut self, size: u32) -> Self {
        self.config.image_size = size;
        self
    }

    /// Set the request body limit for uploads
    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Configure SMTP delivery
    pub fn smtp(mut self, smtp: SmtpSettings) -> Self {
        self.config.smtp = Some(smtp);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
