use std::{str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local part, `@`, domain containing at least one dot. Whitespace and
/// additional `@` characters are rejected, everything else is accepted.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[nutype(
    validate(regex = EMAIL_ADDRESS_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Hash, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self
    }

    pub fn with_name(self, name: impl Into<String>) -> Mailbox {
        Mailbox {
            name: Some(name.into()),
            email: self,
        }
    }
}

impl FromStr for EmailAddress {
    type Err = EmailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

/// An email address with an optional display name, e.g.
/// `Manoga Contact <contact@manoga.digital>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: EmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailboxParseError {
    #[error("The mailbox does not contain a valid email address.")]
    InvalidAddress,
    #[error("The mailbox has an unterminated angle bracket.")]
    Unterminated,
}

impl From<EmailAddress> for Mailbox {
    fn from(email: EmailAddress) -> Self {
        Self { name: None, email }
    }
}

impl FromStr for Mailbox {
    type Err = MailboxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let Some((name, rest)) = s.rsplit_once('<') else {
            let email = s.parse().map_err(|_| MailboxParseError::InvalidAddress)?;
            return Ok(Self { name: None, email });
        };

        let address = rest
            .strip_suffix('>')
            .ok_or(MailboxParseError::Unterminated)?;
        let email = address
            .trim()
            .parse()
            .map_err(|_| MailboxParseError::InvalidAddress)?;

        let name = name.trim().trim_matches('"').trim();
        let name = (!name.is_empty()).then(|| name.to_owned());

        Ok(Self { name, email })
    }
}

impl std::fmt::Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

impl Serialize for Mailbox {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Mailbox {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use manoga_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn email_address_pattern() {
        for valid in [
            "max.mustermann@example.de",
            "a@b.c",
            "first+tag@sub.domain.example",
            "weird\"quote@example.com",
        ] {
            assert!(valid.parse::<EmailAddress>().is_ok(), "{valid}");
        }

        for invalid in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@example.",
            "user @example.com",
            "user@exa mple.com",
            "user@@example.com",
            "user@example.com ",
        ] {
            assert!(invalid.parse::<EmailAddress>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn parse_mailbox_with_name() {
        let mailbox = "Manoga Contact <contact@manoga.digital>"
            .parse::<Mailbox>()
            .unwrap();

        assert_eq!(mailbox.name.as_deref(), Some("Manoga Contact"));
        assert_eq!(mailbox.email.as_str(), "contact@manoga.digital");
        assert_eq!(
            mailbox.to_string(),
            "Manoga Contact <contact@manoga.digital>"
        );
    }

    #[test]
    fn parse_mailbox_quoted_name() {
        let mailbox = "\"Manoga\" <hi@manoga.digital>".parse::<Mailbox>().unwrap();
        assert_eq!(mailbox.name.as_deref(), Some("Manoga"));
    }

    #[test]
    fn parse_mailbox_without_name() {
        let mailbox = " hi@manoga.digital ".parse::<Mailbox>().unwrap();

        assert_eq!(mailbox.name, None);
        assert_eq!(mailbox.to_string(), "hi@manoga.digital");
    }

    #[test]
    fn parse_mailbox_errors() {
        assert_matches!(
            "Manoga <hi@manoga.digital".parse::<Mailbox>(),
            Err(MailboxParseError::Unterminated)
        );
        assert_matches!(
            "Manoga <not an address>".parse::<Mailbox>(),
            Err(MailboxParseError::InvalidAddress)
        );
        assert_matches!(
            "Manoga Contact".parse::<Mailbox>(),
            Err(MailboxParseError::InvalidAddress)
        );
    }

    #[test]
    fn deserialize_mailbox() {
        let mailbox = serde_json::from_value::<Mailbox>(serde_json::json!(
            "Manoga Contact <contact@manoga.digital>"
        ))
        .unwrap();
        assert_eq!(
            mailbox,
            "contact@manoga.digital"
                .parse::<EmailAddress>()
                .unwrap()
                .with_name("Manoga Contact")
        );

        assert!(serde_json::from_value::<Mailbox>(serde_json::json!("nope")).is_err());
    }
}
