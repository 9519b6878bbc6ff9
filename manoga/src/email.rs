use manoga_config::EmailConfig;
use manoga_email_impl::{EmailServiceConfig, EmailServiceImpl};
use tracing::warn;

/// Build the Resend client, or `None` if no api key has been configured.
pub fn connect(config: &EmailConfig) -> anyhow::Result<Option<EmailServiceImpl>> {
    let Some(api_key) = &config.api_key else {
        warn!("No Resend API key configured, contact form submissions cannot be delivered");
        return Ok(None);
    };

    let config = EmailServiceConfig::new(api_key.as_str(), config.endpoint.clone());
    EmailServiceImpl::new(config).map(Some)
}
