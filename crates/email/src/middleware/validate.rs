use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::errors::ErrorResponse;
use validator::{Validate, ValidationErrors};

/// Request bodies whose fields are optional on the wire but required by the handler.
pub trait RequiredFields {
    fn missing_fields(&self) -> Vec<&'static str>;
}

/// JSON extractor that checks required fields, then `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + RequiredFields + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = ErrorResponse::new(format!("Invalid JSON: {}", rejection.body_text()));
                (rejection.status(), Json(payload))
            })?;

        let missing = value.missing_fields();
        if !missing.is_empty() {
            let payload =
                ErrorResponse::new(format!("Missing required fields: {}", missing.join(", ")));
            return Err((StatusCode::BAD_REQUEST, Json(payload)));
        }

        value.validate().map_err(|validation_errors| {
            let payload = ErrorResponse::new(format!(
                "Validation failed: {}",
                format_validation_errors(&validation_errors)
            ))
            .with_details(Some(format_validation_errors_detailed(&validation_errors)));
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn error_message(field: &str, error: &validator::ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => format!("{field}: Invalid email format"),
            "length" => format!("{field}: Invalid length"),
            _ => format!("Invalid {field}"),
        })
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            error_messages.push(error_message(&field, error));
        }
    }

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.sort();
        error_messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| error_message(&field, e))
            .collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}
