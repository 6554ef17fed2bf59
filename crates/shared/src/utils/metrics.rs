use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct EmailLabels {
    pub email_type: String,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub emails_sent: Family<EmailLabels, Counter>,
    pub delivery_duration: Family<EmailLabels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            emails_sent: Family::default(),
            delivery_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ]
                .into_iter())
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "emails_sent",
            "Delivery attempts per email type and outcome",
            self.emails_sent.clone(),
        );

        registry.register(
            "email_delivery_duration_seconds",
            "Time spent waiting on the delivery provider",
            self.delivery_duration.clone(),
        );
    }

    pub fn record(&self, email_type: &str, status: Status, duration_secs: f64) {
        let labels = EmailLabels {
            email_type: email_type.to_string(),
            status,
        };
        self.emails_sent.get_or_create(&labels).inc();
        self.delivery_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}
