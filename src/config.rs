use anyhow::{anyhow, bail, Result};
use chrono::NaiveTime;
use std::{io::ErrorKind, path::PathBuf};

const CONFIG_PATH_REL_HOME: &str = ".config/tallybot/config.toml";
const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Bot configuration
#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub daily_summary: DailySummary,
}

#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct General {
    pub discord_token: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DailySummary {
    /// Local wall-clock hour at which the summary rolls over to a new day
    pub flush_hour: u32,
    pub flush_minute: u32,
}

impl Default for DailySummary {
    fn default() -> Self {
        Self {
            flush_hour: 0,
            flush_minute: 17,
        }
    }
}

impl DailySummary {
    pub fn flush_time(&self) -> Result<NaiveTime> {
        NaiveTime::from_hms_opt(self.flush_hour, self.flush_minute, 0).ok_or(anyhow!(
            "Invalid daily_summary flush time {:02}:{:02}",
            self.flush_hour,
            self.flush_minute
        ))
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    /// Load the configuration file if there is one, then apply the environment on top.
    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;

        let config = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Self::from_toml_str(&contents).map_err(|e| {
                anyhow!(
                    "Could not parse configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                )
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(anyhow!(
                    "Could not read configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        config.with_env_token(std::env::var(TOKEN_ENV_VAR).ok())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.daily_summary.flush_time()?;
        Ok(config)
    }

    /// The environment token, when set, wins over the file.
    fn with_env_token(mut self, env_token: Option<String>) -> Result<Self> {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            self.general.discord_token = token;
        }

        if self.general.discord_token.trim().is_empty() {
            bail!(
                "No Discord token: set {} or `general.discord_token` in ~/{}",
                TOKEN_ENV_VAR,
                CONFIG_PATH_REL_HOME
            );
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = Config::from_toml_str(
            r#"
            [general]
            discord_token = "abc"

            [daily_summary]
            flush_hour = 6
            flush_minute = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.general.discord_token, "abc");
        assert_eq!(
            config.daily_summary.flush_time().unwrap(),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.general.discord_token, "");
        assert_eq!(
            config.daily_summary.flush_time().unwrap(),
            NaiveTime::from_hms_opt(0, 17, 0).unwrap()
        );
    }

    #[test]
    fn rejects_invalid_flush_time() {
        let result = Config::from_toml_str("[daily_summary]\nflush_hour = 24\n");
        assert!(result.is_err());
    }

    #[test]
    fn env_token_overrides_file() {
        let config = Config::from_toml_str("[general]\ndiscord_token = \"file\"\n")
            .unwrap()
            .with_env_token(Some("env".to_owned()))
            .unwrap();
        assert_eq!(config.general.discord_token, "env");
    }

    #[test]
    fn blank_env_token_keeps_file_token() {
        let config = Config::from_toml_str("[general]\ndiscord_token = \"file\"\n")
            .unwrap()
            .with_env_token(Some("  ".to_owned()))
            .unwrap();
        assert_eq!(config.general.discord_token, "file");
    }

    #[test]
    fn missing_token_is_fatal() {
        assert!(Config::default().with_env_token(None).is_err());
    }
}
