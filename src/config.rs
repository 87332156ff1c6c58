use crate::error::{AppError, Result};
use crate::report::MessageStyle;
use crate::sheets::{RangeSelector, SpreadsheetRef};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "sheetcast";
pub(crate) const TOKEN_CACHE_FILE: &str = "google_tokens.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub google: GoogleConfig,
    pub sheet: SheetConfig,
    pub slack: SlackConfig,
    #[serde(default)]
    pub message: MessageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GoogleConfig {
    /// Which credential flow to use; determines how `credentials` is read.
    pub auth: GoogleAuthMode,
    /// Path to the OAuth client secret or service account key JSON file.
    pub credentials: PathBuf,
    /// Overrides the default token cache location (OAuth mode only).
    pub token_cache: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GoogleAuthMode {
    /// Interactive installed-app flow with an on-disk token cache.
    #[default]
    Oauth,
    /// Non-interactive service account key; a fresh token every run.
    ServiceAccount,
}

impl GoogleConfig {
    pub fn token_cache_path(&self) -> Result<PathBuf> {
        match &self.token_cache {
            Some(path) => Ok(path.clone()),
            None => Config::cache_file(TOKEN_CACHE_FILE),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SheetConfig {
    /// Spreadsheet identifier, as it appears in the sheet URL.
    pub id: Option<String>,
    /// Spreadsheet title, resolved through a Drive search.
    pub name: Option<String>,
    /// Bounds string like "Sheet1!A1:B3"; absent means the entire first sheet.
    pub range: Option<String>,
}

impl SheetConfig {
    pub fn spreadsheet(&self) -> Result<SpreadsheetRef> {
        match (self.id.as_deref(), self.name.as_deref()) {
            (Some(id), None) if !id.is_empty() => Ok(SpreadsheetRef::Id(id.to_string())),
            (None, Some(name)) if !name.is_empty() => Ok(SpreadsheetRef::Name(name.to_string())),
            _ => Err(AppError::Config(
                "Exactly one of sheet.id and sheet.name must be set".to_string(),
            )),
        }
    }

    pub fn selector(&self) -> RangeSelector {
        match &self.range {
            Some(range) => RangeSelector::Explicit(range.clone()),
            None => RangeSelector::FirstSheet,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlackConfig {
    /// Destination channel, e.g. "#status".
    pub channel: String,
    /// Environment variable holding the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "SLACK_API_TOKEN".to_string()
}

impl Default for SlackConfig {
    fn default() -> Self {
        SlackConfig {
            channel: String::new(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MessageConfig {
    #[serde(default)]
    pub style: MessageStyle,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        if !config_path.exists() {
            return Err(AppError::Config(format!(
                "Config file not found at {:?}. Please create one.",
                config_path
            )));
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        if config.google.credentials.as_os_str().is_empty() {
            return Err(AppError::Config(
                "google.credentials must be set in config file".to_string(),
            ));
        }

        config.sheet.spreadsheet()?;

        if config.slack.channel.is_empty() {
            return Err(AppError::Config(
                "slack.channel must be set in config file".to_string(),
            ));
        }

        if config.slack.token_env.is_empty() {
            return Err(AppError::Config(
                "slack.token_env must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }

    /// Get the cache directory path
    pub fn cache_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_cache_home()
            .ok_or_else(|| AppError::Config("Failed to determine cache directory".to_string()))
    }

    /// Get a cache file path
    pub fn cache_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_cache_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create cache file path: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            google: GoogleConfig {
                auth: GoogleAuthMode::ServiceAccount,
                credentials: PathBuf::from("/secrets/service_account.json"),
                token_cache: None,
            },
            sheet: SheetConfig {
                id: Some("1abc".to_string()),
                name: None,
                range: Some("Foglio1!A1:B3".to_string()),
            },
            slack: SlackConfig {
                channel: "#status".to_string(),
                token_env: "SLACK_BOT_TOKEN".to_string(),
            },
            message: MessageConfig {
                style: MessageStyle::Table,
            },
        };

        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.google.auth, deserialized.google.auth);
        assert_eq!(config.google.credentials, deserialized.google.credentials);
        assert_eq!(config.sheet.id, deserialized.sheet.id);
        assert_eq!(config.slack.channel, deserialized.slack.channel);
        assert_eq!(config.message.style, deserialized.message.style);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r##"
            [google]
            auth = "oauth"
            credentials = "/secrets/credentials.json"
            token_cache = "/tmp/google_tokens.json"

            [sheet]
            id = "1abc"
            range = "Foglio1!A1:B3"

            [slack]
            channel = "#status"
            token_env = "SLACK_BOT_TOKEN"

            [message]
            style = "table"
            "##,
        )
        .unwrap();

        assert_eq!(config.google.auth, GoogleAuthMode::Oauth);
        assert_eq!(
            config.google.token_cache_path().unwrap(),
            PathBuf::from("/tmp/google_tokens.json")
        );
        assert_eq!(config.slack.channel, "#status");
        assert_eq!(config.slack.token_env, "SLACK_BOT_TOKEN");
        assert_eq!(config.message.style, MessageStyle::Table);
        assert_eq!(
            config.sheet.spreadsheet().unwrap(),
            SpreadsheetRef::Id("1abc".to_string())
        );
        assert_eq!(
            config.sheet.selector(),
            RangeSelector::Explicit("Foglio1!A1:B3".to_string())
        );
    }

    #[test]
    fn test_parse_minimal_config_defaults() {
        let config: Config = toml::from_str(
            r##"
            [google]
            auth = "service-account"
            credentials = "/secrets/service_account.json"

            [sheet]
            name = "Monthly metrics"

            [slack]
            channel = "#status"
            "##,
        )
        .unwrap();

        assert_eq!(config.google.auth, GoogleAuthMode::ServiceAccount);
        assert_eq!(config.google.token_cache, None);
        assert_eq!(config.slack.token_env, "SLACK_API_TOKEN");
        assert_eq!(config.message.style, MessageStyle::Update);
        assert_eq!(
            config.sheet.spreadsheet().unwrap(),
            SpreadsheetRef::Name("Monthly metrics".to_string())
        );
        assert_eq!(config.sheet.selector(), RangeSelector::FirstSheet);
    }

    #[test]
    fn test_spreadsheet_requires_one_reference() {
        let neither = SheetConfig::default();
        assert!(neither.spreadsheet().is_err());

        let both = SheetConfig {
            id: Some("1abc".to_string()),
            name: Some("Metrics".to_string()),
            range: None,
        };
        assert!(both.spreadsheet().is_err());

        let empty_id = SheetConfig {
            id: Some(String::new()),
            name: None,
            range: None,
        };
        assert!(empty_id.spreadsheet().is_err());
    }
}
