use crate::errors::{ErrorResponse, ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
    Upstream {
        message: String,
        details: Option<Value>,
    },
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Config(msg) => HttpError::Internal(msg),
            ServiceError::Template(_) | ServiceError::Internal(_) => {
                HttpError::Internal(err.to_string())
            }
            ServiceError::Delivery(delivery_err) => HttpError::Upstream {
                details: delivery_err.details().cloned(),
                message: delivery_err.to_string(),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(msg)),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            HttpError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
            HttpError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(message).with_details(details),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeliveryError;
    use serde_json::json;

    #[test]
    fn config_error_maps_to_internal() {
        let err = HttpError::from(ServiceError::Config(
            "BREVO_API_KEY is not configured".into(),
        ));

        match err {
            HttpError::Internal(msg) => assert_eq!(msg, "BREVO_API_KEY is not configured"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn provider_error_keeps_details() {
        let err = HttpError::from(ServiceError::Delivery(DeliveryError::Provider {
            status: 401,
            message: "Key not found".into(),
            details: Some(json!({ "code": "unauthorized", "message": "Key not found" })),
        }));

        match err {
            HttpError::Upstream { message, details } => {
                assert_eq!(message, "Key not found");
                assert_eq!(details.unwrap()["code"], "unauthorized");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn transport_error_has_no_details() {
        let err = HttpError::from(ServiceError::Delivery(DeliveryError::Transport(
            "connection refused".into(),
        )));

        match err {
            HttpError::Upstream { message, details } => {
                assert_eq!(message, "Transport error: connection refused");
                assert!(details.is_none());
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
