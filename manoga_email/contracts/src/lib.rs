use std::future::Future;

use manoga_models::email_address::{EmailAddress, Mailbox};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Hand a single email to the delivery provider.
    ///
    /// Exactly one attempt is made, failures are not retried.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: anyhow::Result<()>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
