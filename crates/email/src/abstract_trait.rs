use crate::domain::{DeliveryReceipt, OutgoingEmail};
use async_trait::async_trait;
use shared::errors::DeliveryError;
use std::sync::Arc;

pub type DynEmailDelivery = Arc<dyn EmailDeliveryTrait>;

/// Hands one rendered message to an email provider.
#[async_trait]
pub trait EmailDeliveryTrait: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError>;
}
