use crate::{
    abstract_trait::EmailDeliveryTrait,
    config::SmtpConfig,
    domain::{DeliveryReceipt, OutgoingEmail},
};
use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use shared::errors::DeliveryError;
use tracing::{error, info};
use uuid::Uuid;

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(host: &str, config: &SmtpConfig) -> Result<Self, DeliveryError> {
        let builder = if config.secure {
            SmtpTransport::relay(host)
        } else {
            SmtpTransport::starttls_relay(host)
        }
        .map_err(|e| DeliveryError::Transport(format!("Failed to create SMTP relay: {e}")))?;

        let mut builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

/// Builds the MIME message and the `Message-ID` it was stamped with.
fn build_message(email: &OutgoingEmail) -> Result<(Message, String), DeliveryError> {
    let from_address: Address = email
        .sender
        .email
        .parse()
        .map_err(|e| DeliveryError::Address(format!("sender {}: {e}", email.sender.email)))?;

    let message_id = format!("<{}@{}>", Uuid::new_v4(), from_address.domain());
    let from = Mailbox::new(Some(email.sender.name.clone()), from_address);

    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| DeliveryError::Address(format!("recipient {}: {e}", email.to)))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .message_id(Some(message_id.clone()))
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| DeliveryError::Message(e.to_string()))?;

    Ok((message, message_id))
}

#[async_trait]
impl EmailDeliveryTrait for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let (message, message_id) = build_message(email)?;

        match self.mailer.send(message).await {
            Ok(_) => {
                info!("✅ Email sent to {} ({})", email.to, message_id);
                Ok(DeliveryReceipt { message_id })
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {}", email.to, e);
                Err(DeliveryError::Transport(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sender;

    fn outgoing(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            sender: Sender {
                email: "no-reply@give.example".into(),
                name: "Give Together".into(),
            },
            to: to.into(),
            subject: "Campaign Review Update - Action Required".into(),
            html: "<p>hello</p>".into(),
        }
    }

    #[test]
    fn message_is_html_with_generated_id() {
        let (message, message_id) = build_message(&outgoing("owner@example.com")).unwrap();

        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@give.example>"));

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
        assert!(raw.contains(&message_id));
    }

    #[test]
    fn invalid_recipient_is_an_address_error() {
        let err = build_message(&outgoing("not an address")).unwrap_err();
        assert!(matches!(err, DeliveryError::Address(_)));
    }
}
