use crate::template::Branding;
use anyhow::{Context, Result, anyhow};
use std::fmt;

const DEFAULT_APP_NAME: &str = "Donation App";
const DEFAULT_APP_URL: &str = "https://your-app-url.com";
const DEFAULT_SUPPORT_EMAIL: &str = "support@your-app.com";
const DEFAULT_BREVO_URL: &str = "https://api.brevo.com";

/// CORS allow-list. An entry of `*` turns the list into a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(origins) => origins.iter().any(|allowed| allowed == origin),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub email: Option<String>,
    pub name: String,
}

#[derive(Clone)]
pub struct BrevoConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl fmt::Debug for BrevoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrevoConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub secure: bool,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("secure", &self.secure)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Brevo(BrevoConfig),
    Smtp(SmtpConfig),
}

impl ProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::Brevo(_) => "Brevo",
            ProviderConfig::Smtp(_) => "SMTP",
        }
    }

    /// Environment variable whose absence leaves the provider unusable.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderConfig::Brevo(_) => "BREVO_API_KEY",
            ProviderConfig::Smtp(_) => "SMTP_HOST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub branding: Branding,
    pub sender: SenderConfig,
    pub provider: ProviderConfig,
    pub allowed_origins: AllowedOrigins,
    pub dev_mode: bool,
    pub enable_file_log: bool,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let flag = |key: &str| {
            var(key)
                .map(|value| value == "true" || value == "1")
                .unwrap_or(false)
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => 3000,
        };

        let branding = Branding {
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            app_url: var("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            support_email: var("SUPPORT_EMAIL")
                .unwrap_or_else(|| DEFAULT_SUPPORT_EMAIL.to_string()),
        };

        let sender = SenderConfig {
            email: var("FROM_EMAIL"),
            name: var("FROM_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        };

        let provider_name = var("EMAIL_PROVIDER").unwrap_or_else(|| "brevo".to_string());

        let provider = match provider_name.to_ascii_lowercase().as_str() {
            "brevo" => ProviderConfig::Brevo(BrevoConfig {
                api_key: var("BREVO_API_KEY"),
                base_url: var("BREVO_API_URL").unwrap_or_else(|| DEFAULT_BREVO_URL.to_string()),
            }),
            "smtp" => {
                let smtp_port = match var("SMTP_PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .context("SMTP_PORT must be a valid u16 integer")?,
                    None => 587,
                };

                ProviderConfig::Smtp(SmtpConfig {
                    host: var("SMTP_HOST"),
                    port: smtp_port,
                    username: var("SMTP_USERNAME"),
                    password: var("SMTP_PASSWORD"),
                    secure: flag("SMTP_SECURE"),
                })
            }
            other => {
                return Err(anyhow!(
                    "EMAIL_PROVIDER must be 'brevo' or 'smtp', got '{}'",
                    other
                ));
            }
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|raw| AllowedOrigins::parse(&raw))
            .unwrap_or(AllowedOrigins::Any);

        Ok(Self {
            port,
            branding,
            sender,
            provider,
            allowed_origins,
            dev_mode: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
            otel_endpoint: var("OTEL_ENDPOINT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.branding.app_name, "Donation App");
        assert_eq!(config.branding.support_email, "support@your-app.com");
        assert_eq!(config.sender.name, "Donation App");
        assert!(config.sender.email.is_none());
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);
        match config.provider {
            ProviderConfig::Brevo(brevo) => {
                assert!(brevo.api_key.is_none());
                assert_eq!(brevo.base_url, "https://api.brevo.com");
            }
            other => panic!("expected brevo, got {other:?}"),
        }
    }

    #[test]
    fn smtp_provider_reads_its_settings() {
        let config = config_from(&[
            ("EMAIL_PROVIDER", "smtp"),
            ("SMTP_HOST", "smtp.example.org"),
            ("SMTP_PORT", "465"),
            ("SMTP_SECURE", "true"),
        ])
        .unwrap();

        assert_eq!(config.provider.credential_var(), "SMTP_HOST");
        match config.provider {
            ProviderConfig::Smtp(smtp) => {
                assert_eq!(smtp.host.as_deref(), Some("smtp.example.org"));
                assert_eq!(smtp.port, 465);
                assert!(smtp.secure);
                assert!(smtp.username.is_none());
            }
            other => panic!("expected smtp, got {other:?}"),
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = config_from(&[("EMAIL_PROVIDER", "pigeon")]).unwrap_err();
        assert!(err.to_string().contains("pigeon"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[("FROM_EMAIL", ""), ("BREVO_API_KEY", "  ")]).unwrap();
        assert!(config.sender.email.is_none());
        match config.provider {
            ProviderConfig::Brevo(brevo) => assert!(brevo.api_key.is_none()),
            other => panic!("expected brevo, got {other:?}"),
        }
    }

    #[test]
    fn origin_list_is_trimmed_and_matched_exactly() {
        let origins = AllowedOrigins::parse("https://app.example, https://admin.example ,");

        assert_eq!(
            origins,
            AllowedOrigins::List(vec![
                "https://app.example".into(),
                "https://admin.example".into()
            ])
        );
        assert!(origins.is_allowed("https://admin.example"));
        assert!(!origins.is_allowed("https://evil.example"));
        assert!(!origins.is_allowed("https://app.example.evil"));
    }

    #[test]
    fn wildcard_entry_allows_everything() {
        let origins = AllowedOrigins::parse("https://app.example,*");
        assert_eq!(origins, AllowedOrigins::Any);
        assert!(origins.is_allowed("https://anything.example"));
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let config = config_from(&[("BREVO_API_KEY", "xkeysib-secret")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("xkeysib-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
