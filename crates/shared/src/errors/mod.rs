mod delivery;
mod error;
mod http;
mod service;

pub use self::delivery::DeliveryError;
pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::service::ServiceError;
