use std::future::Future;

use manoga_models::contact::{ContactSubmission, ContactValidationError};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Process a contact form submission and notify the site owner.
    ///
    /// Submissions which look automated are discarded without an error.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    /// The notification has been handed to the delivery provider.
    Delivered,
    /// The submission looked automated and has been dropped silently.
    Discarded,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Required fields are missing.")]
    MissingFields,
    #[error("The email address is invalid.")]
    InvalidEmail,
    #[error("Email delivery has not been configured.")]
    NotConfigured,
    #[error("Failed to send message.")]
    Send(#[source] anyhow::Error),
}

impl From<ContactValidationError> for ContactSubmitError {
    fn from(value: ContactValidationError) -> Self {
        match value {
            ContactValidationError::MissingFields => Self::MissingFields,
            ContactValidationError::InvalidEmailFormat => Self::InvalidEmail,
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
