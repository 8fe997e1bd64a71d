//! Runtime settings
//!
//! Loaded once at startup from an optional TOML file plus environment
//! variables with the `PARKDESK_` prefix (`PARKDESK_SMTP__HOST`,
//! `PARKDESK_SERVER__PORT`, ...), then passed around read-only.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SMTP delivery configuration
    #[serde(default)]
    pub smtp: SmtpConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS origin checks
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// SMTP delivery configuration
///
/// Host, user and pass have no defaults: when any of them is absent the
/// mailer reports failure without attempting a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay hostname
    #[serde(default)]
    pub host: Option<String>,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Use implicit TLS instead of STARTTLS
    #[serde(default)]
    pub secure: bool,

    /// Authentication user
    #[serde(default)]
    pub user: Option<String>,

    /// Authentication password
    #[serde(default)]
    pub pass: Option<String>,

    /// Sender address override
    #[serde(default)]
    pub from: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            secure: false,
            user: None,
            pass: None,
            from: None,
        }
    }
}

impl SmtpConfig {
    /// Sender address: configured override, falling back to the auth user,
    /// falling back to the operator's no-reply address
    pub fn sender(&self) -> String {
        self.from
            .clone()
            .or_else(|| self.user.clone())
            .unwrap_or_else(|| "no-reply@urbanparking.co.il".to_string())
    }
}

/// Load settings from `config/default.toml` (if present) and environment
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from("config/default")
}

/// Load settings from a specific file stem and the environment
pub fn load_settings_from(path: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("PARKDESK").separator("__"))
        .build()?
        .try_deserialize::<Settings>()?;

    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        smtp_configured = settings.smtp.host.is_some(),
        "Settings loaded"
    );

    Ok(settings)
}
