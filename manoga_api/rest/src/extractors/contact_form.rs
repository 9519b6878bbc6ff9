use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use tracing::debug;

use crate::models::contact::ApiContactSubmission;

/// Contact form body sent either as JSON or url encoded form.
///
/// Never rejects: an unreadable body yields an empty submission.
pub struct ContactForm(pub ApiContactSubmission);

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .is_some_and(|x| x.starts_with("application/x-www-form-urlencoded"));

        let result = if is_form {
            Form::<ApiContactSubmission>::from_request(request, state)
                .await
                .map(|Form(x)| x)
                .map_err(|err| err.body_text())
        } else {
            Json::<ApiContactSubmission>::from_request(request, state)
                .await
                .map(|Json(x)| x)
                .map_err(|err| err.body_text())
        };

        let submission = result.unwrap_or_else(|err| {
            debug!(%err, "failed to parse contact form body");
            ApiContactSubmission::default()
        });

        Ok(Self(submission))
    }
}
