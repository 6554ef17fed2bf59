use serde_json::Value;
use thiserror::Error;

/// Failure reported by an email delivery provider or its transport.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The provider answered, but refused the message.
    #[error("{message}")]
    Provider {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Message(String),
}

impl DeliveryError {
    pub fn details(&self) -> Option<&Value> {
        match self {
            DeliveryError::Provider { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
