use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use manoga_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{error, method_not_allowed};
use crate::{extractors::contact_form::ContactForm, models::ApiSuccess};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ContactForm(submission): ContactForm,
) -> Response {
    // delivered and discarded submissions share the same response
    match service.submit(submission.into()).await {
        Ok(_) => Json(ApiSuccess::default()).into_response(),
        Err(ContactSubmitError::MissingFields) => {
            error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        Err(ContactSubmitError::InvalidEmail) => {
            error(StatusCode::BAD_REQUEST, "Invalid email address")
        }
        Err(ContactSubmitError::NotConfigured) => {
            tracing::error!("email delivery api key is not configured (set RESEND_API_KEY)");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
        }
        Err(ContactSubmitError::Send(err)) => {
            tracing::error!("failed to send contact form notification: {err:#}");
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
    }
}
