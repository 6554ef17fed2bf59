use crate::{
    abstract_trait::DynEmailDelivery,
    config::{Config, ProviderConfig},
    handler::AppRouter,
    service::{BrevoClient, SmtpMailer},
    state::AppState,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct EmailServiceApp {
    config: Config,
}

impl EmailServiceApp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the provider client, or `None` when its credential is missing.
    ///
    /// A missing credential does not stop the server: health stays up and
    /// every send answers with a configuration error.
    pub fn build_delivery(config: &Config) -> Result<Option<DynEmailDelivery>> {
        let delivery = match &config.provider {
            ProviderConfig::Brevo(brevo) => match &brevo.api_key {
                Some(api_key) => {
                    let client = BrevoClient::new(&brevo.base_url, api_key.clone())
                        .context("Failed to create Brevo client")?;
                    Some(Arc::new(client) as DynEmailDelivery)
                }
                None => None,
            },
            ProviderConfig::Smtp(smtp) => match &smtp.host {
                Some(host) => {
                    let mailer =
                        SmtpMailer::new(host, smtp).context("Failed to create SMTP transport")?;
                    Some(Arc::new(mailer) as DynEmailDelivery)
                }
                None => None,
            },
        };

        match &delivery {
            Some(_) => info!("📮 Email provider: {}", config.provider.name()),
            None => error!(
                "❌ {} is not configured, emails cannot be sent",
                config.provider.credential_var()
            ),
        }

        if config.sender.email.is_none() {
            warn!("⚠️ FROM_EMAIL is not configured, emails cannot be sent");
        }

        Ok(delivery)
    }

    pub async fn run(self) -> Result<()> {
        let delivery = Self::build_delivery(&self.config)?;
        let state = AppState::new(&self.config, delivery);

        AppRouter::serve(self.config.port, state)
            .await
            .context("Failed to start server")
    }
}
