use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
    pub message: String,
}

impl SendEmailResponse {
    pub fn sent(message_id: String) -> Self {
        Self {
            success: true,
            message_id,
            message: "Email sent successfully".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationEmailsResponse {
    pub success: bool,
    pub notification_sent: bool,
    pub thank_you_sent: bool,
    pub errors: Vec<String>,
}
