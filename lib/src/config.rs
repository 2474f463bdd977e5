use serde::Deserialize;

use crate::Error;

pub const DEFAULT_PATH: &str = "/etc/sesmail/sesmail.toml";
const ENV_PREFIX: &str = "SESMAIL";

/// Process-wide settings. Built once at startup and shared read-only.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Region of the bucket the receipt rule writes raw messages to
    pub aws_region: String,

    /// Envelopes whose TopicArn does not end with this are rejected
    pub topic_suffix: String,

    pub port: u16,

    /// Path segment envelopes are POSTed to
    pub route: String,

    /// Max envelope body size, in bytes
    pub max_envelope_size: u64,

    pub storage_timeout_secs: u64,
    pub confirm_timeout_secs: u64,

    /// Where attachment temp files are created. Defaults to the OS temp dir.
    pub attachment_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".to_string(),
            topic_suffix: "sesmail".to_string(),
            port: 7777,
            route: "ses".to_string(),
            max_envelope_size: 256 * 1024,
            storage_timeout_secs: 30,
            confirm_timeout_secs: 10,
            attachment_dir: None,
        }
    }
}

/// Loads config from the filesystem and merges it with any
/// environment variables prefixed with SESMAIL_.
///
/// The file is optional; missing keys fall back to `Config::default()`.
pub fn load_config(path: Option<&str>) -> Result<Config, Error> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path.unwrap_or(DEFAULT_PATH)).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()?;

    Ok(settings.try_deserialize::<Config>()?)
}
