use manoga_models::contact::ContactSubmission;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Email address of the sender
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    /// The service the sender is interested in
    #[serde(default, deserialize_with = "lenient_string")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    /// Honeypot, always empty when sent by a human
    #[serde(default, deserialize_with = "honeypot")]
    pub website: Option<String>,
    /// Render time of the form in milliseconds since the unix epoch
    #[serde(default, rename = "_t", deserialize_with = "lenient_timestamp")]
    pub rendered_at: Option<i64>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            service: value.service,
            message: value.message,
            website: value.website,
            rendered_at: value.rendered_at,
        }
    }
}

/// Accepts strings, numbers and `true`. Everything else counts as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".into()),
        _ => None,
    })
}

/// Like [`lenient_string`], but every truthy value counts as filled in,
/// including arrays and objects (kept as their JSON text).
fn honeypot<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".into()),
        Some(value @ (Value::Array(_) | Value::Object(_))) => Some(value.to_string()),
        _ => None,
    })
}

/// Accepts integers, floats (truncated) and strings starting with an integer.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|x| x.is_finite())
                .map(|x| x.trunc() as i64)
        }),
        Some(Value::String(s)) => parse_int_prefix(&s),
        _ => None,
    })
}

/// Parse the leading decimal integer of `s`, ignoring anything after it.
///
/// Leading whitespace and a sign are allowed. Values out of range saturate.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| i64::from(b - b'0'))
        .collect::<Vec<_>>();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .into_iter()
        .try_fold(0i64, |acc, d| acc.checked_mul(10)?.checked_add(d));

    Some(match (negative, magnitude) {
        (false, Some(x)) => x,
        (true, Some(x)) => -x,
        (false, None) => i64::MAX,
        (true, None) => i64::MIN,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_int() {
        for (input, expected) in [
            ("1700000000000", Some(1_700_000_000_000)),
            ("  42", Some(42)),
            ("+7", Some(7)),
            ("-7", Some(-7)),
            ("1700000000000abc", Some(1_700_000_000_000)),
            ("12.9", Some(12)),
            ("0", Some(0)),
            ("", None),
            ("abc", None),
            ("-", None),
            ("99999999999999999999999", Some(i64::MAX)),
            ("-99999999999999999999999", Some(i64::MIN)),
        ] {
            assert_eq!(parse_int_prefix(input), expected, "{input:?}");
        }
    }

    #[test]
    fn deserialize_json() {
        let result = serde_json::from_value::<ApiContactSubmission>(json!({
            "name": "Max Mustermann",
            "email": "max.mustermann@example.de",
            "phone": 491234567,
            "service": null,
            "message": "Hello World!",
            "website": "",
            "_t": 1700000000000i64,
            "unknown": [1, 2, 3],
        }))
        .unwrap();

        assert_eq!(
            result,
            ApiContactSubmission {
                name: Some("Max Mustermann".into()),
                email: Some("max.mustermann@example.de".into()),
                phone: Some("491234567".into()),
                service: None,
                message: Some("Hello World!".into()),
                website: Some(String::new()),
                rendered_at: Some(1_700_000_000_000),
            }
        );
    }

    #[test]
    fn deserialize_json_coercion() {
        let result = serde_json::from_value::<ApiContactSubmission>(json!({
            "name": false,
            "email": {"address": "max.mustermann@example.de"},
            "message": true,
            "_t": "1700000000000",
        }))
        .unwrap();

        assert_eq!(result.name, None);
        assert_eq!(result.email, None);
        assert_eq!(result.message.as_deref(), Some("true"));
        assert_eq!(result.rendered_at, Some(1_700_000_000_000));
    }

    #[test]
    fn deserialize_honeypot() {
        for (input, filled) in [
            (json!("https://spam.example"), true),
            (json!(["https://spam.example"]), true),
            (json!({"url": "https://spam.example"}), true),
            (json!([]), true),
            (json!({}), true),
            (json!(1), true),
            (json!(true), true),
            (json!(""), false),
            (json!(0), false),
            (json!(0.0), false),
            (json!(false), false),
            (json!(null), false),
        ] {
            let result =
                serde_json::from_value::<ApiContactSubmission>(json!({ "website": &input }))
                    .unwrap();
            let submission = ContactSubmission::from(result);
            assert_eq!(submission.honeypot_filled(), filled, "{input}");
        }
    }

    #[test]
    fn deserialize_timestamp() {
        for (input, expected) in [
            (json!(1700000000000i64), Some(1_700_000_000_000)),
            (json!(1700000000000.7), Some(1_700_000_000_000)),
            (json!("1700000000000"), Some(1_700_000_000_000)),
            (json!("soon"), None),
            (json!(null), None),
            (json!([1]), None),
        ] {
            let result =
                serde_json::from_value::<ApiContactSubmission>(json!({ "_t": input })).unwrap();
            assert_eq!(result.rendered_at, expected);
        }
    }

    #[test]
    fn deserialize_empty() {
        let result = serde_json::from_value::<ApiContactSubmission>(json!({})).unwrap();
        assert_eq!(result, ApiContactSubmission::default());
    }
}
