use std::ops::Deref;

use serde::Deserialize;

/// Human readable duration like `1h 30m` or `500ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                parse_part(part).map(|x| out.saturating_add(x))
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse_part(part: &str) -> Option<std::time::Duration> {
    let unit_start = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(unit_start);
    let value = value.parse::<u64>().ok()?;

    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return None,
    };

    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
}
