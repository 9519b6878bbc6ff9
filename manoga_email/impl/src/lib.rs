use std::sync::Arc;

use anyhow::{bail, Context};
use manoga_email_contracts::{ContentType, Email, EmailService};
use manoga_models::{email_address::EmailAddress, Sensitive};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

mod http;

const RESEND_ENDPOINT: &str = "https://api.resend.com/";

/// [`EmailService`] backed by the Resend transactional email API.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    endpoint: Arc<Url>,
    api_key: Sensitive<Arc<str>>,
}

impl EmailServiceConfig {
    pub fn new(api_key: impl Into<Arc<str>>, endpoint_override: Option<Url>) -> Self {
        let mut endpoint = endpoint_override.unwrap_or_else(default_endpoint);

        // `Url::join` would otherwise replace the last path segment
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Self {
            endpoint: endpoint.into(),
            api_key: Sensitive(api_key.into()),
        }
    }
}

fn default_endpoint() -> Url {
    RESEND_ENDPOINT.parse().unwrap()
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new().context("Failed to build http client")?,
        })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: email.sender.to_string(),
            to: [email.recipient.to_string()],
            reply_to: email.reply_to.as_ref().map(EmailAddress::as_str),
            subject: &email.subject,
            html,
            text,
        };

        let response = self
            .client
            .post(self.config.endpoint.join("emails")?)
            .bearer_auth(&**self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the email delivery api")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Email delivery api responded with {status}: {body}");
        }

        let SendEmailResponse { id } = response
            .json()
            .await
            .context("Failed to parse email delivery api response")?;
        debug!(%id, "email accepted for delivery");

        Ok(())
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [String; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}
