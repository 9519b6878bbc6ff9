use anyhow::Context;
use clap::Subcommand;
use manoga_config::Config;
use manoga_email_contracts::{ContentType, Email, EmailService};
use manoga_models::email_address::Mailbox;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: Mailbox },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: Mailbox) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?
        .context("Cannot send emails without an api key (set RESEND_API_KEY)")?;

    info!("Sending test email to {recipient}");
    email_service
        .send(Email {
            sender: config.contact.sender,
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
        })
        .await
        .context("Failed to send email")
}
