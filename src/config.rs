use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FeedError, Result};

pub const DEFAULT_PROVIDER_URL: &str = "https://www.netflix.com/";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account: AccountConfig,
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub email: String,
    pub password: String,
    pub profile_token: String,
    pub user_guid: String,
    /// Opaque `authURL` value for the export endpoint. Passed through as-is.
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub filename: PathBuf,
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AccountConfig {
    pub fn provider_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PROVIDER_URL)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            FeedError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::parse(&raw).map_err(|err| match err {
            FeedError::Config(msg) => FeedError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(raw).map_err(|err| FeedError::Config(err.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("account.email", self.account.email.as_str()),
            ("account.password", self.account.password.as_str()),
            ("account.profile_token", self.account.profile_token.as_str()),
            ("account.user_guid", self.account.user_guid.as_str()),
            ("feed.href", self.feed.href.as_str()),
            ("feed.title", self.feed.title.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(FeedError::Config(format!("`{key}` must not be empty")));
            }
        }
        if self.feed.filename.as_os_str().is_empty() {
            return Err(FeedError::Config("`feed.filename` must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[account]
email = "viewer@example.com"
password = "hunter2"
profile_token = "PROFILE"
user_guid = "GUID123"

[feed]
filename = "/tmp/feed.xml"
href = "https://example.com/feed.xml"
title = "Recently watched"
"#;

    #[test]
    fn parses_minimal_config() {
        let config = Config::parse(VALID).expect("config should parse");
        assert_eq!(config.account.email, "viewer@example.com");
        assert_eq!(config.feed.filename, PathBuf::from("/tmp/feed.xml"));
        assert!(config.account.auth_token.is_none());
        assert!(config.cache.path.is_none());
        assert_eq!(config.account.provider_url(), DEFAULT_PROVIDER_URL);
    }

    #[test]
    fn reads_optional_sections() {
        let raw = format!("{VALID}\n[cache]\npath = \"/var/cache/activity.csv\"\n").replace(
            "user_guid = \"GUID123\"",
            "user_guid = \"GUID123\"\nauth_token = \"opaque\"\nbase_url = \"http://127.0.0.1:9/\"",
        );
        let config = Config::parse(&raw).expect("config should parse");
        assert_eq!(config.account.auth_token.as_deref(), Some("opaque"));
        assert_eq!(config.account.provider_url(), "http://127.0.0.1:9/");
        assert_eq!(
            config.cache.path,
            Some(PathBuf::from("/var/cache/activity.csv"))
        );
    }

    #[test]
    fn rejects_missing_required_field() {
        let raw = VALID.replace("password = \"hunter2\"\n", "");
        let err = Config::parse(&raw).expect_err("missing password should fail");
        assert!(
            matches!(&err, FeedError::Config(msg) if msg.contains("password")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn rejects_blank_required_field() {
        let raw = VALID.replace("title = \"Recently watched\"", "title = \"  \"");
        let err = Config::parse(&raw).expect_err("blank title should fail");
        assert!(
            matches!(&err, FeedError::Config(msg) if msg.contains("feed.title")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load(&dir.path().join("absent.toml")).expect_err("should fail");
        assert!(matches!(err, FeedError::Config(_)));
    }
}
