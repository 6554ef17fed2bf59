use crate::{
    domain::{
        DonationNotificationData, EmailKind, EmailPayload, InvalidEmailKind,
        requests::{SendDonationEmailsRequest, SendEmailRequest},
        response::{DonationEmailsResponse, SendEmailResponse},
    },
    middleware::validate::SimpleValidatedJson,
    service::EmailDispatcher,
    state::AppState,
};
use axum::{Extension, Json, http::StatusCode, response::IntoResponse, routing::post};
use chrono::Local;
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/send-email",
    tag = "Email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email accepted by the provider", body = SendEmailResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Missing configuration or provider error", body = ErrorResponse)
    )
)]
pub async fn send_email_handler(
    Extension(dispatcher): Extension<Arc<EmailDispatcher>>,
    SimpleValidatedJson(body): SimpleValidatedJson<SendEmailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (Some(email_type), Some(to), Some(data)) = (body.email_type, body.to, body.data) else {
        return Err(HttpError::BadRequest(
            "Missing required fields: type, to, data".to_string(),
        ));
    };

    dispatcher.ensure_ready()?;

    let kind: EmailKind = email_type
        .parse()
        .map_err(|e: InvalidEmailKind| HttpError::BadRequest(e.to_string()))?;

    let payload = EmailPayload::from_json(kind, data)
        .map_err(|e| HttpError::BadRequest(format!("Invalid data for \"{kind}\": {e}")))?;

    let receipt = dispatcher
        .send(&to, &payload, Local::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(SendEmailResponse::sent(receipt.message_id))))
}

#[utoipa::path(
    post,
    path = "/api/send-donation-emails",
    tag = "Email",
    request_body = SendDonationEmailsRequest,
    responses(
        (status = 200, description = "Both emails sent", body = DonationEmailsResponse),
        (status = 207, description = "One of the two emails failed", body = DonationEmailsResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Missing configuration or both emails failed", body = DonationEmailsResponse)
    )
)]
pub async fn send_donation_emails_handler(
    Extension(dispatcher): Extension<Arc<EmailDispatcher>>,
    SimpleValidatedJson(body): SimpleValidatedJson<SendDonationEmailsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (Some(owner_email), Some(donor_email), Some(donation_data)) = (
        body.campaign_owner_email,
        body.donor_email,
        body.donation_data,
    ) else {
        return Err(HttpError::BadRequest(
            "Missing required fields: campaignOwnerEmail, donorEmail, donationData".to_string(),
        ));
    };

    let donation: DonationNotificationData = serde_json::from_value(donation_data)
        .map_err(|e| HttpError::BadRequest(format!("Invalid donationData: {e}")))?;

    dispatcher.ensure_ready()?;

    let outcome = dispatcher
        .send_donation_emails(
            &owner_email,
            &donor_email,
            &donation,
            Local::now().date_naive(),
        )
        .await;

    let notification_sent = outcome.notification_sent();
    let thank_you_sent = outcome.thank_you_sent();

    let status = match (notification_sent, thank_you_sent) {
        (true, true) => StatusCode::OK,
        (false, false) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::MULTI_STATUS,
    };

    let response = DonationEmailsResponse {
        success: notification_sent && thank_you_sent,
        notification_sent,
        thank_you_sent,
        errors: outcome.errors(),
    };

    Ok((status, Json(response)))
}

pub fn email_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/send-email", post(send_email_handler))
        .route("/api/send-donation-emails", post(send_donation_emails_handler))
        .layer(Extension(app_state.dispatcher.clone()))
}
