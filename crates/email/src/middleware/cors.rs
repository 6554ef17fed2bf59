use crate::config::AllowedOrigins;
use axum::{
    Extension,
    body::Body,
    http::{Method, Request, header},
    middleware::Next,
    response::IntoResponse,
};
use shared::errors::HttpError;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

/// Rejects requests whose `Origin` is not on the allow-list.
///
/// Requests without an `Origin` header (mobile apps, curl, server-to-server)
/// always pass.
pub async fn cors_guard(
    Extension(origins): Extension<Arc<AllowedOrigins>>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();

        if !origins.is_allowed(origin) {
            warn!("🚫 Blocked request from origin {:?}", origin);
            return Err(HttpError::Forbidden("Not allowed by CORS".to_string()));
        }
    }

    Ok(next.run(req).await)
}

/// Response headers for origins that made it past [`cors_guard`].
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
