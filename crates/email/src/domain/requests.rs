use crate::middleware::validate::RequiredFields;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Reads any JSON scalar as text, so a wrongly typed `type` or address is
/// reported by the type and address checks instead of failing the whole body.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
pub struct SendEmailRequest {
    /// One of the supported email types, e.g. `thank-you`.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub email_type: Option<String>,

    #[validate(email(message = "to must be a valid email address"))]
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: Option<String>,

    /// Template data; its shape depends on `type`.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

impl RequiredFields for SendEmailRequest {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.email_type) {
            missing.push("type");
        }
        if is_blank(&self.to) {
            missing.push("to");
        }
        if self.data.is_none() {
            missing.push("data");
        }
        missing
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendDonationEmailsRequest {
    #[validate(email(message = "campaignOwnerEmail must be a valid email address"))]
    #[serde(default, deserialize_with = "lenient_string")]
    pub campaign_owner_email: Option<String>,

    #[validate(email(message = "donorEmail must be a valid email address"))]
    #[serde(default, deserialize_with = "lenient_string")]
    pub donor_email: Option<String>,

    /// Donation notification data, reused for the donor's thank-you.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub donation_data: Option<Value>,
}

impl RequiredFields for SendDonationEmailsRequest {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.campaign_owner_email) {
            missing.push("campaignOwnerEmail");
        }
        if is_blank(&self.donor_email) {
            missing.push("donorEmail");
        }
        if self.donation_data.is_none() {
            missing.push("donationData");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_only_the_missing_fields() {
        let req: SendEmailRequest =
            serde_json::from_value(json!({ "to": "a@example.com", "data": {} })).unwrap();
        assert_eq!(req.missing_fields(), vec!["type"]);

        let req: SendEmailRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.missing_fields(), vec!["type", "to", "data"]);
    }

    #[test]
    fn blank_strings_and_null_data_count_as_missing() {
        let req: SendEmailRequest =
            serde_json::from_value(json!({ "type": "", "to": " ", "data": null })).unwrap();
        assert_eq!(req.missing_fields(), vec!["type", "to", "data"]);
    }

    #[test]
    fn donation_request_uses_camel_case_names() {
        let req: SendDonationEmailsRequest = serde_json::from_value(json!({
            "campaignOwnerEmail": "owner@example.com",
            "donationData": {}
        }))
        .unwrap();
        assert_eq!(req.missing_fields(), vec!["donorEmail"]);
    }

    #[test]
    fn non_string_values_are_kept_as_text() {
        let req: SendEmailRequest = serde_json::from_value(json!({
            "type": 5,
            "to": true,
            "data": {}
        }))
        .unwrap();
        assert_eq!(req.email_type.as_deref(), Some("5"));
        assert_eq!(req.to.as_deref(), Some("true"));
        assert!(req.missing_fields().is_empty());
        assert!(req.validate().is_err());

        let req: SendDonationEmailsRequest = serde_json::from_value(json!({
            "campaignOwnerEmail": null,
            "donorEmail": 7,
            "donationData": {}
        }))
        .unwrap();
        assert_eq!(req.missing_fields(), vec!["campaignOwnerEmail"]);
        assert_eq!(req.donor_email.as_deref(), Some("7"));
    }

    #[test]
    fn malformed_recipient_fails_validation() {
        let req: SendEmailRequest = serde_json::from_value(json!({
            "type": "thank-you",
            "to": "not-an-email",
            "data": {}
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
