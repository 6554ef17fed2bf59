mod brevo;
mod dispatch;
mod smtp;

pub use self::brevo::BrevoClient;
pub use self::dispatch::{DonationEmailsOutcome, EmailDispatcher};
pub use self::smtp::SmtpMailer;
