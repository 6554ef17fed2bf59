mod format;

pub use self::format::{average_donation, duration_text, money, plural, present, progress_percentage};

use crate::domain::{
    CampaignApprovalData, CampaignCompletionData, CampaignRejectionData, DonationNotificationData,
    EmailPayload, RenderedEmail, ThankYouData,
};
use askama::Template;
use chrono::NaiveDate;
use tracing::{debug, error};

/// Identity shown in the header and footer of every email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub app_name: String,
    pub app_url: String,
    pub support_email: String,
}

#[derive(Template)]
#[template(path = "donation_notification.html")]
struct DonationNotificationTemplate<'a> {
    brand: &'a Branding,
    owner_name: &'a str,
    campaign_title: &'a str,
    display_name: &'a str,
    amount: String,
    message: Option<&'a str>,
    total_raised: String,
    target_amount: String,
    progress: u8,
}

#[derive(Template)]
#[template(path = "thank_you.html")]
struct ThankYouTemplate<'a> {
    brand: &'a Branding,
    donor_name: &'a str,
    campaign_title: &'a str,
    owner_name: &'a str,
    amount: String,
    date: String,
    is_anonymous: bool,
    message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "campaign_approval.html")]
struct CampaignApprovalTemplate<'a> {
    brand: &'a Branding,
    owner_name: &'a str,
    campaign_title: &'a str,
    approval_message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "campaign_rejection.html")]
struct CampaignRejectionTemplate<'a> {
    brand: &'a Branding,
    owner_name: &'a str,
    campaign_title: &'a str,
    rejection_reason: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "campaign_completion.html")]
struct CampaignCompletionTemplate<'a> {
    brand: &'a Branding,
    owner_name: &'a str,
    campaign_title: &'a str,
    total_raised: String,
    target_amount: String,
    percentage: u8,
    donor_count: u64,
    donor_plural: &'static str,
    duration: String,
    average: String,
}

/// Turns template data into subject and HTML body.
///
/// Rendering is pure: the only time-dependent input, the date printed on
/// thank-you receipts, is passed in by the caller.
#[derive(Debug, Clone)]
pub struct EmailRenderer {
    branding: Branding,
}

impl EmailRenderer {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn render(
        &self,
        payload: &EmailPayload,
        today: NaiveDate,
    ) -> Result<RenderedEmail, askama::Error> {
        debug!("📧 Rendering {} email", payload.kind());

        let rendered = match payload {
            EmailPayload::DonationNotification(data) => self.donation_notification(data),
            EmailPayload::ThankYou(data) => self.thank_you(data, today),
            EmailPayload::CampaignApproval(data) => self.campaign_approval(data),
            EmailPayload::CampaignRejection(data) => self.campaign_rejection(data),
            EmailPayload::CampaignCompletion(data) => self.campaign_completion(data),
        };

        if let Err(e) = &rendered {
            error!("❌ Failed to render {} email: {}", payload.kind(), e);
        }

        rendered
    }

    pub fn donation_notification(
        &self,
        data: &DonationNotificationData,
    ) -> Result<RenderedEmail, askama::Error> {
        let display_name = if data.is_anonymous {
            "An anonymous supporter"
        } else {
            data.donor_name.as_str()
        };

        let html = DonationNotificationTemplate {
            brand: &self.branding,
            owner_name: &data.campaign_owner_name,
            campaign_title: &data.campaign_title,
            display_name,
            amount: money(data.amount),
            message: present(data.message.as_deref()),
            total_raised: money(data.total_raised),
            target_amount: money(data.target_amount),
            progress: progress_percentage(data.total_raised, data.target_amount),
        }
        .render()?;

        Ok(RenderedEmail {
            subject: format!("🎉 New Donation Received for \"{}\"", data.campaign_title),
            html,
        })
    }

    pub fn thank_you(
        &self,
        data: &ThankYouData,
        today: NaiveDate,
    ) -> Result<RenderedEmail, askama::Error> {
        let html = ThankYouTemplate {
            brand: &self.branding,
            donor_name: &data.donor_name,
            campaign_title: &data.campaign_title,
            owner_name: &data.campaign_owner_name,
            amount: money(data.amount),
            date: today.format("%B %-d, %Y").to_string(),
            is_anonymous: data.is_anonymous,
            message: present(data.message.as_deref()),
        }
        .render()?;

        Ok(RenderedEmail {
            subject: format!(
                "💚 Thank You for Your Donation to \"{}\"",
                data.campaign_title
            ),
            html,
        })
    }

    pub fn campaign_approval(
        &self,
        data: &CampaignApprovalData,
    ) -> Result<RenderedEmail, askama::Error> {
        let html = CampaignApprovalTemplate {
            brand: &self.branding,
            owner_name: &data.owner_name,
            campaign_title: &data.campaign_title,
            approval_message: present(data.approval_message.as_deref()),
        }
        .render()?;

        Ok(RenderedEmail {
            subject: "🎉 Your Campaign Has Been Approved!".to_string(),
            html,
        })
    }

    pub fn campaign_rejection(
        &self,
        data: &CampaignRejectionData,
    ) -> Result<RenderedEmail, askama::Error> {
        let html = CampaignRejectionTemplate {
            brand: &self.branding,
            owner_name: &data.owner_name,
            campaign_title: &data.campaign_title,
            rejection_reason: present(data.rejection_reason.as_deref()),
        }
        .render()?;

        Ok(RenderedEmail {
            subject: "Campaign Review Update - Action Required".to_string(),
            html,
        })
    }

    pub fn campaign_completion(
        &self,
        data: &CampaignCompletionData,
    ) -> Result<RenderedEmail, askama::Error> {
        let html = CampaignCompletionTemplate {
            brand: &self.branding,
            owner_name: &data.owner_name,
            campaign_title: &data.campaign_title,
            total_raised: money(data.total_raised),
            target_amount: money(data.target_amount),
            percentage: progress_percentage(data.total_raised, data.target_amount),
            donor_count: data.donor_count,
            donor_plural: plural(data.donor_count),
            duration: duration_text(data.campaign_duration),
            average: money(average_donation(data.total_raised, data.donor_count)),
        }
        .render()?;

        Ok(RenderedEmail {
            subject: "🎯 Congratulations! Campaign Goal Reached!".to_string(),
            html,
        })
    }
}
