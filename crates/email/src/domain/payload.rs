use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EmailKind {
    DonationNotification,
    ThankYou,
    CampaignApproval,
    CampaignRejection,
    CampaignCompletion,
}

impl EmailKind {
    pub const ALL: [EmailKind; 5] = [
        EmailKind::DonationNotification,
        EmailKind::ThankYou,
        EmailKind::CampaignApproval,
        EmailKind::CampaignRejection,
        EmailKind::CampaignCompletion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::DonationNotification => "donation-notification",
            EmailKind::ThankYou => "thank-you",
            EmailKind::CampaignApproval => "campaign-approval",
            EmailKind::CampaignRejection => "campaign-rejection",
            EmailKind::CampaignCompletion => "campaign-completion",
        }
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Invalid email type. Must be one of: \"donation-notification\", \"thank-you\", \"campaign-approval\", \"campaign-rejection\", \"campaign-completion\""
)]
pub struct InvalidEmailKind(pub String);

impl FromStr for EmailKind {
    type Err = InvalidEmailKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidEmailKind(s.to_string()))
    }
}

/// `null` and absence both mean "not set".
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationNotificationData {
    pub campaign_owner_name: String,
    pub campaign_title: String,
    pub donor_name: String,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_anonymous: bool,
    pub total_raised: f64,
    pub target_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouData {
    pub donor_name: String,
    pub campaign_title: String,
    pub campaign_owner_name: String,
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_anonymous: bool,
}

impl From<&DonationNotificationData> for ThankYouData {
    fn from(data: &DonationNotificationData) -> Self {
        ThankYouData {
            donor_name: data.donor_name.clone(),
            campaign_title: data.campaign_title.clone(),
            campaign_owner_name: data.campaign_owner_name.clone(),
            amount: data.amount,
            message: data.message.clone(),
            is_anonymous: data.is_anonymous,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignApprovalData {
    pub owner_name: String,
    pub campaign_title: String,
    #[serde(default)]
    pub approval_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRejectionData {
    pub owner_name: String,
    pub campaign_title: String,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCompletionData {
    pub owner_name: String,
    pub campaign_title: String,
    pub target_amount: f64,
    pub total_raised: f64,
    pub donor_count: u64,
    /// Campaign length in milliseconds.
    #[serde(default)]
    pub campaign_duration: Option<u64>,
}

/// Template data paired with the email type it belongs to.
#[derive(Debug, Clone)]
pub enum EmailPayload {
    DonationNotification(DonationNotificationData),
    ThankYou(ThankYouData),
    CampaignApproval(CampaignApprovalData),
    CampaignRejection(CampaignRejectionData),
    CampaignCompletion(CampaignCompletionData),
}

impl EmailPayload {
    pub fn from_json(kind: EmailKind, data: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EmailKind::DonationNotification => {
                EmailPayload::DonationNotification(serde_json::from_value(data)?)
            }
            EmailKind::ThankYou => EmailPayload::ThankYou(serde_json::from_value(data)?),
            EmailKind::CampaignApproval => {
                EmailPayload::CampaignApproval(serde_json::from_value(data)?)
            }
            EmailKind::CampaignRejection => {
                EmailPayload::CampaignRejection(serde_json::from_value(data)?)
            }
            EmailKind::CampaignCompletion => {
                EmailPayload::CampaignCompletion(serde_json::from_value(data)?)
            }
        })
    }

    pub fn kind(&self) -> EmailKind {
        match self {
            EmailPayload::DonationNotification(_) => EmailKind::DonationNotification,
            EmailPayload::ThankYou(_) => EmailKind::ThankYou,
            EmailPayload::CampaignApproval(_) => EmailKind::CampaignApproval,
            EmailPayload::CampaignRejection(_) => EmailKind::CampaignRejection,
            EmailPayload::CampaignCompletion(_) => EmailKind::CampaignCompletion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_parse_from_wire_names() {
        for kind in EmailKind::ALL {
            assert_eq!(kind.as_str().parse::<EmailKind>(), Ok(kind));
        }
        assert!("newsletter".parse::<EmailKind>().is_err());
        assert!("Thank-You".parse::<EmailKind>().is_err());
    }

    #[test]
    fn payload_accepts_camel_case_and_ignores_extra_fields() {
        let payload = EmailPayload::from_json(
            EmailKind::CampaignApproval,
            json!({
                "ownerName": "Ada",
                "campaignTitle": "Clean Water",
                "campaignId": 42
            }),
        )
        .unwrap();

        assert_eq!(payload.kind(), EmailKind::CampaignApproval);
        match payload {
            EmailPayload::CampaignApproval(data) => {
                assert_eq!(data.owner_name, "Ada");
                assert!(data.approval_message.is_none());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn null_anonymity_flag_means_public() {
        let payload = EmailPayload::from_json(
            EmailKind::ThankYou,
            json!({
                "donorName": "Grace",
                "campaignTitle": "Clean Water",
                "campaignOwnerName": "Ada",
                "amount": 25,
                "message": null,
                "isAnonymous": null
            }),
        )
        .unwrap();

        match payload {
            EmailPayload::ThankYou(data) => {
                assert!(!data.is_anonymous);
                assert!(data.message.is_none());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn payload_with_missing_field_is_rejected() {
        let err = EmailPayload::from_json(
            EmailKind::DonationNotification,
            json!({ "campaignOwnerName": "Ada", "campaignTitle": "Clean Water" }),
        )
        .unwrap_err();

        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn thank_you_is_derived_from_donation() {
        let donation: DonationNotificationData = serde_json::from_value(json!({
            "campaignOwnerName": "Ada",
            "campaignTitle": "Clean Water",
            "donorName": "Grace",
            "amount": 25.0,
            "message": "Good luck",
            "isAnonymous": true,
            "totalRaised": 500.0,
            "targetAmount": 1000.0
        }))
        .unwrap();

        let thank_you = ThankYouData::from(&donation);
        assert_eq!(thank_you.donor_name, "Grace");
        assert_eq!(thank_you.campaign_owner_name, "Ada");
        assert_eq!(thank_you.message.as_deref(), Some("Good luck"));
        assert!(thank_you.is_anonymous);
    }
}
