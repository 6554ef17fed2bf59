use crate::{
    abstract_trait::EmailDeliveryTrait,
    domain::{DeliveryReceipt, OutgoingEmail, Sender},
};
use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::errors::DeliveryError;
use tracing::{error, info};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionalEmail<'a> {
    sender: &'a Sender,
    to: [Recipient<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    message_id: Option<String>,
    #[serde(default)]
    message_ids: Vec<String>,
}

/// Client for Brevo's transactional email API (`POST /v3/smtp/email`).
#[derive(Clone)]
pub struct BrevoClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl BrevoClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .user_agent(concat!("donation-email/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeliveryError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}/v3/smtp/email", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    fn provider_error(status: reqwest::StatusCode, body: &str) -> DeliveryError {
        let details = serde_json::from_str::<Value>(body)
            .ok()
            .or_else(|| (!body.is_empty()).then(|| Value::String(body.to_string())));

        let message = details
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Brevo returned {status}"));

        DeliveryError::Provider {
            status: status.as_u16(),
            message,
            details,
        }
    }
}

#[async_trait]
impl EmailDeliveryTrait for BrevoClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let payload = TransactionalEmail {
            sender: &email.sender,
            to: [Recipient { email: &email.to }],
            subject: &email.subject,
            html_content: &email.html,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Brevo request to {} failed: {}", email.to, e);
                DeliveryError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = Self::provider_error(status, &body);
            error!("❌ Brevo rejected email to {}: {}", email.to, err);
            return Err(err);
        }

        let parsed: SendResponse = serde_json::from_str(&body).map_err(|e| {
            DeliveryError::Transport(format!("Unexpected Brevo response: {e}"))
        })?;

        let message_id = parsed
            .message_id
            .or_else(|| parsed.message_ids.into_iter().next())
            .ok_or_else(|| {
                DeliveryError::Transport("Brevo response carried no message id".to_string())
            })?;

        info!("✅ Brevo accepted email to {} ({})", email.to, message_id);

        Ok(DeliveryReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = BrevoClient::new("https://api.brevo.com/", "key").unwrap();
        assert_eq!(client.endpoint, "https://api.brevo.com/v3/smtp/email");
    }

    #[test]
    fn json_error_body_becomes_details() {
        let err = BrevoClient::provider_error(
            StatusCode::UNAUTHORIZED,
            r#"{"code":"unauthorized","message":"Key not found"}"#,
        );

        assert_eq!(err.to_string(), "Key not found");
        assert_eq!(err.details().unwrap()["code"], "unauthorized");
        match err {
            DeliveryError::Provider { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn plain_error_body_is_kept_verbatim() {
        let err = BrevoClient::provider_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "Brevo returned 502 Bad Gateway");
        assert_eq!(err.details(), Some(&Value::String("upstream down".into())));
    }

    #[test]
    fn payload_uses_brevo_field_names() {
        let sender = Sender {
            email: "no-reply@give.example".into(),
            name: "Give Together".into(),
        };
        let payload = TransactionalEmail {
            sender: &sender,
            to: [Recipient {
                email: "donor@example.com",
            }],
            subject: "Hi",
            html_content: "<p>Hi</p>",
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["sender"]["email"], "no-reply@give.example");
        assert_eq!(json["to"][0]["email"], "donor@example.com");
        assert_eq!(json["htmlContent"], "<p>Hi</p>");
    }
}
