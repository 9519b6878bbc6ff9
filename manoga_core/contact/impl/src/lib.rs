use std::sync::Arc;

use manoga_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use manoga_email_contracts::EmailService;
use manoga_models::{contact::ContactSubmission, email_address::Mailbox};
use manoga_shared_contracts::spam::{SpamService, SpamVerdict};
use tracing::{debug, info};

use crate::notification::ContactNotification;

pub mod notification;


#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Spam, Email> {
    spam: Spam,
    /// `None` if no delivery credential has been configured.
    email: Option<Email>,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub sender: Arc<Mailbox>,
    pub recipient: Arc<Mailbox>,
}

impl<Spam, Email> ContactFeatureServiceImpl<Spam, Email> {
    pub fn new(spam: Spam, email: Option<Email>, config: ContactFeatureConfig) -> Self {
        Self {
            spam,
            email,
            config,
        }
    }
}

impl<Spam, EmailS> ContactFeatureService for ContactFeatureServiceImpl<Spam, EmailS>
where
    Spam: SpamService,
    EmailS: EmailService,
{
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        // must stay indistinguishable from a delivered submission for the caller
        if let SpamVerdict::Suspicious(signal) = self.spam.evaluate(&submission) {
            debug!(?signal, "discarding suspicious contact form submission");
            return Ok(ContactSubmitOutcome::Discarded);
        }

        let inquiry = submission.validate()?;

        let Some(email) = &self.email else {
            return Err(ContactSubmitError::NotConfigured);
        };

        let notification =
            ContactNotification::compose(&inquiry, &self.config.sender, &self.config.recipient);

        email
            .send(notification.into())
            .await
            .map_err(ContactSubmitError::Send)?;

        info!("contact form notification sent");

        Ok(ContactSubmitOutcome::Delivered)
    }
}
