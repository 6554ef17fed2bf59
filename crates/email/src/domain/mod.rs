mod email;
mod payload;
pub mod requests;
pub mod response;

pub use self::email::{DeliveryReceipt, OutgoingEmail, RenderedEmail, Sender};
pub use self::payload::{
    CampaignApprovalData, CampaignCompletionData, CampaignRejectionData,
    DonationNotificationData, EmailKind, EmailPayload, InvalidEmailKind, ThankYouData,
};
