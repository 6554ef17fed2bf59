use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

/// A fully rendered message addressed to exactly one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub sender: Sender,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl OutgoingEmail {
    pub fn new(sender: Sender, to: impl Into<String>, rendered: RenderedEmail) -> Self {
        Self {
            sender,
            to: to.into(),
            subject: rendered.subject,
            html: rendered.html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}
