use thiserror::Error;

use crate::email_address::EmailAddress;

/// A raw, untrusted contact form submission.
///
/// Every field may be absent, the values are exactly what the client sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    /// Honeypot field. Hidden from humans, so it must be empty.
    pub website: Option<String>,
    /// Milliseconds since the unix epoch at which the form was rendered.
    pub rendered_at: Option<i64>,
}

/// A contact form submission which passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInquiry {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name, email address or message is missing.")]
    MissingFields,
    #[error("The email address is invalid.")]
    InvalidEmailFormat,
}

impl ContactSubmission {
    /// Returns `true` if the honeypot field has been filled in.
    pub fn honeypot_filled(&self) -> bool {
        self.website.as_deref().is_some_and(|x| !x.is_empty())
    }

    /// Check the required fields and the email address syntax.
    pub fn validate(self) -> Result<ContactInquiry, ContactValidationError> {
        let (Some(name), Some(email), Some(message)) = (
            non_empty(self.name),
            non_empty(self.email),
            non_empty(self.message),
        ) else {
            return Err(ContactValidationError::MissingFields);
        };

        let email = EmailAddress::try_new(email)
            .map_err(|_| ContactValidationError::InvalidEmailFormat)?;

        Ok(ContactInquiry {
            name,
            email,
            phone: non_empty(self.phone),
            service: non_empty(self.service),
            message,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.is_empty())
}
