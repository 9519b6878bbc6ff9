use manoga_email_contracts::{ContentType, Email};
use manoga_models::{
    contact::ContactInquiry,
    email_address::{EmailAddress, Mailbox},
};
use manoga_utils::html::escape;

const PHONE_PLACEHOLDER: &str = "Not provided";
const SERVICE_PLACEHOLDER: &str = "Not selected";

/// The email sent to the site owner for each accepted inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotification {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: EmailAddress,
    pub subject: String,
    pub html_body: String,
}

impl ContactNotification {
    /// Build the notification for `inquiry`. Every user supplied value is
    /// escaped before it is embedded into the subject or body.
    pub fn compose(inquiry: &ContactInquiry, from: &Mailbox, to: &Mailbox) -> Self {
        let name = escape(&inquiry.name);
        let email = escape(inquiry.email.as_str());
        let phone = inquiry
            .phone
            .as_deref()
            .map_or_else(|| PHONE_PLACEHOLDER.into(), escape);
        let service = inquiry
            .service
            .as_deref()
            .map_or_else(|| SERVICE_PLACEHOLDER.into(), escape);
        let message = escape(&inquiry.message);

        let rows = [
            row("Name", &name),
            row("Email", &email),
            row("Phone", &phone),
            row("Service", &service),
        ]
        .concat();

        let html_body = format!(
            r#"<h2>New Contact Form Submission</h2>
<table style="border-collapse: collapse; width: 100%; max-width: 600px;">
{rows}</table>
<hr style="margin: 16px 0;" />
<p><strong>Message:</strong></p>
<p style="white-space: pre-wrap;">{message}</p>
"#
        );

        Self {
            from: from.clone(),
            to: to.clone(),
            reply_to: inquiry.email.clone(),
            subject: format!("New inquiry from {name}"),
            html_body,
        }
    }
}

fn row(label: &str, value: &str) -> String {
    format!(
        "  <tr><td style=\"padding: 8px; font-weight: bold;\">{label}</td>\
         <td style=\"padding: 8px;\">{value}</td></tr>\n"
    )
}

impl From<ContactNotification> for Email {
    fn from(value: ContactNotification) -> Self {
        Self {
            sender: value.from,
            recipient: value.to,
            reply_to: Some(value.reply_to),
            subject: value.subject,
            body: value.html_body,
            content_type: ContentType::Html,
        }
    }
}
