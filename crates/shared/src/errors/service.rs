use crate::errors::delivery::DeliveryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Config(String),

    #[error("Failed to render email template: {0}")]
    Template(String),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("Internal error: {0}")]
    Internal(String),
}
