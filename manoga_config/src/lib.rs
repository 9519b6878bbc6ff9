use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use manoga_models::{email_address::Mailbox, Sensitive};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

const CONFIG_PATHS_ENV: &str = "MANOGA_CONFIG";
const API_KEY_ENV: &str = "RESEND_API_KEY";

/// Load the config from the default config file and the files listed in
/// `MANOGA_CONFIG`. `RESEND_API_KEY` takes precedence over `email.api_key`.
pub fn load() -> anyhow::Result<Config> {
    let extra_paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = std::iter::once(PathBuf::from(DEFAULT_CONFIG_PATH))
        .chain(
            extra_paths
                .split(':')
                .filter(|x| !x.is_empty())
                .map(PathBuf::from),
        )
        .collect::<Vec<_>>();

    let api_key = std::env::var(API_KEY_ENV).ok();

    load_from(&paths, api_key)
}

/// Merge the given config files (later files win) and apply the api key
/// override. An empty api key counts as absent.
pub fn load_from(paths: &[impl AsRef<Path>], api_key: Option<String>) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    let api_key = api_key.filter(|x| !x.is_empty());

    let mut config = builder
        .set_override_option("email.api_key", api_key)?
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    if config.email.api_key.as_ref().is_some_and(|x| x.is_empty()) {
        config.email.api_key = None;
    }

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    #[serde(default)]
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub spam: SpamConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailConfig {
    /// Base url of the Resend api, defaults to the public endpoint
    pub endpoint: Option<Url>,
    pub api_key: Option<Sensitive<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub sender: Mailbox,
    pub recipient: Mailbox,
}

#[derive(Debug, Deserialize)]
pub struct SpamConfig {
    pub min_fill_time: Duration,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_tmp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "manoga-config-{}-{name}",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_default_config() {
        let config = load_from(&[Path::new(DEFAULT_CONFIG_PATH)], None).unwrap();

        assert_eq!(
            config.contact.sender.to_string(),
            "Manoga Contact <contact@manoga.digital>"
        );
        assert_eq!(config.contact.recipient.to_string(), "hi@manoga.digital");
        assert_eq!(*config.spam.min_fill_time, std::time::Duration::from_secs(3));
        assert!(config.email.api_key.is_none());
    }

    #[test]
    fn api_key_override() {
        let config =
            load_from(&[Path::new(DEFAULT_CONFIG_PATH)], Some("re_123".into())).unwrap();

        assert_eq!(
            config.email.api_key.as_deref().map(String::as_str),
            Some("re_123")
        );
    }

    #[test]
    fn empty_api_key_is_absent() {
        let overlay = write_tmp("empty-key.toml", "[email]\napi_key = \"\"\n");

        let paths = [Path::new(DEFAULT_CONFIG_PATH), overlay.as_path()];
        let config = load_from(&paths, Some(String::new())).unwrap();

        assert!(config.email.api_key.is_none());
    }

    #[test]
    fn later_files_win() {
        let overlay = write_tmp(
            "overlay.toml",
            r#"
[http]
port = 9000

[email]
api_key = "re_file"

[spam]
min_fill_time = "500ms"
"#,
        );

        let paths = [Path::new(DEFAULT_CONFIG_PATH), overlay.as_path()];
        let config = load_from(&paths, None).unwrap();

        assert_eq!(config.http.port, 9000);
        assert_eq!(
            config.email.api_key.as_deref().map(String::as_str),
            Some("re_file")
        );
        assert_eq!(
            *config.spam.min_fill_time,
            std::time::Duration::from_millis(500)
        );
    }

    #[test]
    fn missing_file() {
        let result = load_from(&[Path::new("/nonexistent/manoga.toml")], None);
        assert!(result.is_err());
    }
}
