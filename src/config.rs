use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use formrelay_contact::FormPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_environment")]
    pub environment: String,
    pub server: ServerConfig,
    #[serde(default)]
    pub form: FormPolicy,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub web3forms: Web3FormsConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub captcha: CaptchaConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            form: FormPolicy::default(),
            relay: RelayConfig::default(),
            web3forms: Web3FormsConfig::default(),
            smtp: SmtpConfig::default(),
            captcha: CaptchaConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub submit_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            submit_path: "/api/submit-form".to_string(),
        }
    }
}

/// Backend the sanitized submission is handed to.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryProvider {
    #[default]
    Web3forms,
    Smtp,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    #[serde(default)]
    pub provider: DeliveryProvider,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            provider: DeliveryProvider::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct Web3FormsConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default = "default_web3forms_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for Web3FormsConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            endpoint: default_web3forms_endpoint(),
            subject: default_subject(),
            from_name: default_from_name(),
        }
    }
}

impl Web3FormsConfig {
    pub fn access_key(&self) -> Option<&str> {
        non_empty(&self.access_key)
    }
}

fn default_web3forms_endpoint() -> String {
    "https://api.web3forms.com/submit".to_string()
}

fn default_subject() -> String {
    "New Contact Form Submission".to_string()
}

fn default_from_name() -> String {
    "Website Contact Form".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_smtp_tls")]
    pub tls: bool,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Mailbox receiving the submissions
    #[serde(default)]
    pub to: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            tls: default_smtp_tls(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            subject: default_subject(),
            to: None,
        }
    }
}

impl SmtpConfig {
    pub fn host(&self) -> Option<&str> {
        non_empty(&self.host)
    }

    pub fn to(&self) -> Option<&str> {
        non_empty(&self.to)
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_tls() -> bool {
    true
}

fn default_from_email() -> String {
    "noreply@example.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaptchaConfig {
    #[serde(default)]
    pub hcaptcha_secret: Option<String>,
    #[serde(default)]
    pub recaptcha_secret: Option<String>,
    #[serde(default = "default_hcaptcha_verify_url")]
    pub hcaptcha_verify_url: String,
    #[serde(default = "default_recaptcha_verify_url")]
    pub recaptcha_verify_url: String,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            hcaptcha_secret: None,
            recaptcha_secret: None,
            hcaptcha_verify_url: default_hcaptcha_verify_url(),
            recaptcha_verify_url: default_recaptcha_verify_url(),
        }
    }
}

impl CaptchaConfig {
    pub fn hcaptcha_secret(&self) -> Option<&str> {
        non_empty(&self.hcaptcha_secret)
    }

    pub fn recaptcha_secret(&self) -> Option<&str> {
        non_empty(&self.recaptcha_secret)
    }
}

fn default_hcaptcha_verify_url() -> String {
    "https://hcaptcha.com/siteverify".to_string()
}

fn default_recaptcha_verify_url() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Unprefixed variables honoured for existing deployments, mapped onto config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("WEB3FORMS_ACCESS_KEY", "web3forms.access_key"),
    ("HCAPTCHA_SECRET", "captcha.hcaptcha_secret"),
    ("RECAPTCHA_SECRET", "captcha.recaptcha_secret"),
    ("NODE_ENV", "environment"),
    ("ENVIRONMENT", "environment"),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (WEB3FORMS_ACCESS_KEY, HCAPTCHA_SECRET, PORT, ...)
    /// 2. Prefixed environment variables (FORMRELAY__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_from(config_path, env::vars().collect())
    }

    /// Same as [`Config::load`] with an explicit set of environment variables.
    pub fn load_from(
        config_path: Option<String>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", defaults.host)?
            .set_default("server.port", i64::from(defaults.port))?
            .set_default("server.submit_path", defaults.submit_path)?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional; a missing file simply falls back to defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FORMRELAY")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (var, key) in LEGACY_ENV {
            if let Some(value) = vars.get(*var).filter(|value| !value.is_empty()) {
                builder = builder.set_override(*key, value.as_str())?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.server.submit_path.starts_with('/') {
            return Err("Submit path must start with '/'".to_string());
        }
        if self.relay.timeout_secs == 0 {
            return Err("Relay timeout must be at least 1 second".to_string());
        }
        Ok(())
    }

    /// Production hides upstream diagnostics from clients and logs as JSON.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
