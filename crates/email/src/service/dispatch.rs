use crate::{
    abstract_trait::DynEmailDelivery,
    domain::{
        DeliveryReceipt, DonationNotificationData, EmailKind, EmailPayload, OutgoingEmail,
        RenderedEmail, Sender, ThankYouData,
    },
    template::EmailRenderer,
};
use chrono::NaiveDate;
use opentelemetry::{
    KeyValue,
    global::{self, BoxedSpan, BoxedTracer},
    trace::{Span, SpanKind, Status as SpanStatus, Tracer},
};
use shared::{
    errors::ServiceError,
    utils::{Metrics, Status},
};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{error, info};

/// Independent results of the owner notification and the donor thank-you.
#[derive(Debug)]
pub struct DonationEmailsOutcome {
    pub notification: Result<DeliveryReceipt, ServiceError>,
    pub thank_you: Result<DeliveryReceipt, ServiceError>,
}

impl DonationEmailsOutcome {
    pub fn notification_sent(&self) -> bool {
        self.notification.is_ok()
    }

    pub fn thank_you_sent(&self) -> bool {
        self.thank_you.is_ok()
    }

    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = &self.notification {
            errors.push(format!("Campaign owner notification: {e}"));
        }
        if let Err(e) = &self.thank_you {
            errors.push(format!("Donor thank you: {e}"));
        }
        errors
    }
}

/// Renders emails and hands them to the configured delivery provider.
pub struct EmailDispatcher {
    renderer: EmailRenderer,
    delivery: Option<DynEmailDelivery>,
    sender: Option<Sender>,
    credential_var: &'static str,
    metrics: Arc<Metrics>,
}

impl EmailDispatcher {
    /// `delivery` is `None` when the provider credential named by
    /// `credential_var` is missing; sends then fail with a configuration error.
    pub fn new(
        renderer: EmailRenderer,
        delivery: Option<DynEmailDelivery>,
        sender: Option<Sender>,
        credential_var: &'static str,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            renderer,
            delivery,
            sender,
            credential_var,
            metrics,
        }
    }

    pub fn ensure_ready(&self) -> Result<(&DynEmailDelivery, &Sender), ServiceError> {
        let delivery = self.delivery.as_ref().ok_or_else(|| {
            ServiceError::Config(format!("{} is not configured", self.credential_var))
        })?;

        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| ServiceError::Config("FROM_EMAIL is not configured".to_string()))?;

        Ok((delivery, sender))
    }

    pub async fn send(
        &self,
        to: &str,
        payload: &EmailPayload,
        today: NaiveDate,
    ) -> Result<DeliveryReceipt, ServiceError> {
        let (delivery, sender) = self.ensure_ready()?;

        let rendered = self
            .renderer
            .render(payload, today)
            .map_err(|e| ServiceError::Template(e.to_string()))?;

        self.deliver(delivery, sender, payload.kind(), to, rendered)
            .await
    }

    pub async fn send_donation_emails(
        &self,
        owner_email: &str,
        donor_email: &str,
        data: &DonationNotificationData,
        today: NaiveDate,
    ) -> DonationEmailsOutcome {
        let notification = EmailPayload::DonationNotification(data.clone());
        let thank_you = EmailPayload::ThankYou(ThankYouData::from(data));

        let (notification, thank_you) = tokio::join!(
            self.send(owner_email, &notification, today),
            self.send(donor_email, &thank_you, today),
        );

        DonationEmailsOutcome {
            notification,
            thank_you,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("email-service")
    }

    fn start_tracing(&self, kind: EmailKind) -> BoxedSpan {
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder("send_email")
            .with_kind(SpanKind::Client)
            .with_attributes(vec![KeyValue::new("email.type", kind.as_str())])
            .start(&tracer);

        span.add_event("Delivery started", vec![]);
        span
    }

    async fn deliver(
        &self,
        delivery: &DynEmailDelivery,
        sender: &Sender,
        kind: EmailKind,
        to: &str,
        rendered: RenderedEmail,
    ) -> Result<DeliveryReceipt, ServiceError> {
        let email = OutgoingEmail::new(sender.clone(), to, rendered);

        info!(email_type = %kind, from = %sender.email, "📧 Sending email to {}", to);

        let mut span = self.start_tracing(kind);
        let started = Instant::now();
        let result = delivery.send(&email).await;
        let elapsed = started.elapsed().as_secs_f64();

        let outcome = match result {
            Ok(receipt) => {
                self.metrics.record(kind.as_str(), Status::Success, elapsed);
                span.set_attribute(KeyValue::new("email.message_id", receipt.message_id.clone()));
                span.set_status(SpanStatus::Ok);
                info!(email_type = %kind, message_id = %receipt.message_id, "✅ Email sent to {}", to);
                Ok(receipt)
            }
            Err(e) => {
                self.metrics.record(kind.as_str(), Status::Error, elapsed);
                span.set_status(SpanStatus::error(e.to_string()));
                error!(email_type = %kind, "❌ Error sending email to {}: {}", to, e);
                Err(ServiceError::Delivery(e))
            }
        };

        span.end();
        outcome
    }
}
