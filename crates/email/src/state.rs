use crate::{
    abstract_trait::DynEmailDelivery,
    config::{AllowedOrigins, Config},
    domain::Sender,
    service::EmailDispatcher,
    template::EmailRenderer,
};
use prometheus_client::registry::Registry;
use shared::utils::Metrics;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<EmailDispatcher>,
    pub allowed_origins: Arc<AllowedOrigins>,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// `delivery` is `None` when the provider credential is missing.
    pub fn new(config: &Config, delivery: Option<DynEmailDelivery>) -> Self {
        let mut registry = Registry::default();
        let metrics = Arc::new(Metrics::new());
        metrics.register(&mut registry);

        let sender = config.sender.email.as_ref().map(|email| Sender {
            email: email.clone(),
            name: config.sender.name.clone(),
        });

        let dispatcher = EmailDispatcher::new(
            EmailRenderer::new(config.branding.clone()),
            delivery,
            sender,
            config.provider.credential_var(),
            metrics.clone(),
        );

        Self {
            dispatcher: Arc::new(dispatcher),
            allowed_origins: Arc::new(config.allowed_origins.clone()),
            registry: Arc::new(Mutex::new(registry)),
            metrics,
        }
    }
}
