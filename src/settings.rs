use std::{path::PathBuf, str::FromStr, time::Duration};

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use log::LevelFilter;
use serde::{de::Error, Deserialize, Deserializer};

use crate::client::{FEEDBACK_CLEAR_AFTER, FEED_LIMIT};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub feed_limit: u32,
    #[serde(deserialize_with = "duration")]
    pub feedback_clear_after: Duration,
    #[serde(deserialize_with = "level")]
    pub log_level: LevelFilter,
    /// Where to write the rendered page after every command, if anywhere.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `kudos.toml` if present, then `KUDOS_*` variables.
    pub fn new() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("kudos").format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("KUDOS").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("feed_limit", FEED_LIMIT as i64)?
            .set_default(
                "feedback_clear_after",
                humantime::format_duration(FEEDBACK_CLEAR_AFTER).to_string(),
            )?
            .set_default("log_level", "info")
    }
}

fn duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(D::Error::custom)
}

fn level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LevelFilter, D::Error> {
    let text = String::deserialize(deserializer)?;
    LevelFilter::from_str(&text).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        Settings::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn defaults_match_the_client() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.feed_limit, 50);
        assert_eq!(settings.feedback_clear_after, Duration::from_millis(3000));
        assert_eq!(settings.log_level, LevelFilter::Info);
        assert_eq!(settings.snapshot_path, None);
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = from_toml(
            r#"
            base_url = "http://kudos.internal:8080"
            feed_limit = 20
            feedback_clear_after = "1s 500ms"
            log_level = "debug"
            snapshot_path = "kudos.html"
            "#,
        )
        .unwrap();

        assert_eq!(settings.base_url, "http://kudos.internal:8080");
        assert_eq!(settings.feed_limit, 20);
        assert_eq!(settings.feedback_clear_after, Duration::from_millis(1500));
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.snapshot_path, Some(PathBuf::from("kudos.html")));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(from_toml(r#"feedback_clear_after = "soon""#).is_err());
    }
}
