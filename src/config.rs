use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use lettre::message::Mailbox;
use portfolio_notification::EmailConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub owner_name: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
}

/// Flask-Mail style variables still honoured on top of the config file.
const LEGACY_ENV: [(&str, &str); 6] = [
    ("MAIL_SERVER", "email.smtp_host"),
    ("MAIL_PORT", "email.smtp_port"),
    ("MAIL_USERNAME", "email.smtp_username"),
    ("MAIL_PASSWORD", "email.smtp_password"),
    ("MAIL_DEFAULT_SENDER", "email.from_address"),
    ("CONTACT_ADDRESS", "email.contact_address"),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy mail variables (MAIL_SERVER, MAIL_USERNAME, etc.)
    /// 2. Environment variables (PORTFOLIO__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("site.owner_name", "Portfolio Owner")?
            .set_default("site.title", "Portfolio")?
            .set_default("email.smtp_host", "localhost")?
            .set_default("email.smtp_port", 1025)?
            .set_default("email.smtp_username", "")?
            .set_default("email.smtp_password", "")?
            .set_default("email.from_address", "Portfolio <noreply@portfolio.localhost>")?
            .set_default("email.contact_address", "owner@portfolio.localhost")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        for (var, key) in LEGACY_ENV {
            if let Ok(value) = env::var(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.from_address.parse::<Mailbox>().is_err() {
            return Err(format!(
                "Invalid sender address: {}",
                self.email.from_address
            ));
        }
        if self.email.contact_address.parse::<Mailbox>().is_err() {
            return Err(format!(
                "Invalid contact address: {}",
                self.email.contact_address
            ));
        }
        Ok(())
    }
}
