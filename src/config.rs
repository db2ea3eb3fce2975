//! Application-level configuration loading, selecting which leaderboard variant is served.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "LEADERBOARD_CONFIG_PATH";

/// Where the per-game routes are mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePrefix {
    /// `/{game}`
    #[default]
    Root,
    /// `/scores/{game}`
    Scores,
}

impl RoutePrefix {
    /// Axum path template for the per-game routes.
    pub fn game_path(self) -> &'static str {
        match self {
            RoutePrefix::Root => "/{game}",
            RoutePrefix::Scores => "/scores/{game}",
        }
    }
}

/// Encoding accepted for score submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionFormat {
    /// `INITIALS,SCORE[,COLOR]`
    #[default]
    Text,
    /// `{"initials": ..., "score": ...}`
    Json,
    /// JSON when the request declares `application/json`, delimited text otherwise.
    Auto,
}

/// Concrete body encoding of a single request once [`SubmissionFormat::Auto`] is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// Delimited text.
    Text,
    /// Structured JSON object.
    Json,
}

impl SubmissionFormat {
    /// Pick the body encoding for a request carrying `content_type`.
    pub fn resolve(self, content_type: Option<&str>) -> BodyEncoding {
        match self {
            SubmissionFormat::Text => BodyEncoding::Text,
            SubmissionFormat::Json => BodyEncoding::Json,
            SubmissionFormat::Auto => {
                let is_json = content_type
                    .and_then(|value| value.split(';').next())
                    .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
                    .unwrap_or(false);
                if is_json {
                    BodyEncoding::Json
                } else {
                    BodyEncoding::Text
                }
            }
        }
    }
}

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Mount point of the per-game routes.
    pub route_prefix: RoutePrefix,
    /// Accepted submission encoding.
    pub submission_format: SubmissionFormat,
    /// Accept, store and return a 24-bit color per score.
    pub color: bool,
    /// Record the submitting peer address.
    pub capture_ip: bool,
    /// Maximum number of rows returned per query; `None` returns every row.
    pub query_limit: Option<u32>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        config = ?app_config,
                        "loaded leaderboard config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse the JSON configuration document.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    route_prefix: RoutePrefix,
    submission_format: SubmissionFormat,
    color: bool,
    capture_ip: bool,
    query_limit: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            route_prefix: value.route_prefix,
            submission_format: value.submission_format,
            color: value.color,
            capture_ip: value.capture_ip,
            // 0 means "no cap", like an absent value.
            query_limit: value.query_limit.filter(|limit| *limit > 0),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.route_prefix, RoutePrefix::Root);
        assert_eq!(config.submission_format, SubmissionFormat::Text);
        assert!(!config.color);
        assert!(config.query_limit.is_none());
    }

    #[test]
    fn full_document_is_parsed() {
        let config = AppConfig::from_json(
            r#"{
                "route_prefix": "scores",
                "submission_format": "auto",
                "color": true,
                "capture_ip": true,
                "query_limit": 100
            }"#,
        )
        .unwrap();

        assert_eq!(config.route_prefix, RoutePrefix::Scores);
        assert_eq!(config.submission_format, SubmissionFormat::Auto);
        assert!(config.color);
        assert!(config.capture_ip);
        assert_eq!(config.query_limit, Some(100));
    }

    #[test]
    fn zero_limit_means_unbounded() {
        let config = AppConfig::from_json(r#"{"query_limit": 0}"#).unwrap();
        assert!(config.query_limit.is_none());
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        assert!(AppConfig::from_json(r#"{"route_prefix": "api"}"#).is_err());
    }

    #[test]
    fn auto_format_follows_content_type() {
        let format = SubmissionFormat::Auto;
        assert_eq!(
            format.resolve(Some("application/json; charset=utf-8")),
            BodyEncoding::Json
        );
        assert_eq!(format.resolve(Some("text/plain")), BodyEncoding::Text);
        assert_eq!(format.resolve(None), BodyEncoding::Text);
        assert_eq!(
            SubmissionFormat::Text.resolve(Some("application/json")),
            BodyEncoding::Text
        );
    }
}
