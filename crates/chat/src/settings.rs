use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu, ensure};

use crate::scheduler::DEFAULT_RESPONSE_DELAY;

pub const SETTINGS_DIRECTORY_NAME: &str = "agent-first";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ENV_PREFIX: &str = "AGENT_FIRST_";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const MAX_RESPONSE_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Pause before an assistant reply is appended.
    pub response_delay_ms: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            response_delay_ms: DEFAULT_RESPONSE_DELAY.as_millis() as u64,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ChatSettings {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn normalized(mut self) -> Self {
        let filter = self.log_filter.trim();
        self.log_filter = if filter.is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            filter.to_string()
        };
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        ensure!(
            self.response_delay_ms <= MAX_RESPONSE_DELAY_MS,
            InvalidSettingSnafu {
                stage: "validate-response-delay",
                key: "response_delay_ms",
                details: format!(
                    "{} exceeds the maximum of {MAX_RESPONSE_DELAY_MS}",
                    self.response_delay_ms
                ),
            }
        );
        Ok(())
    }

    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".agent-first"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }

    /// Layers defaults, the JSON file at `path` (if present) and
    /// `AGENT_FIRST_*` environment variables.
    pub fn extract(path: &Path) -> Result<Self, SettingsError> {
        let settings = Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract::<Self>()
            .context(ExtractSnafu {
                stage: "extract-settings",
                path: path.to_path_buf(),
            })?
            .normalized();

        settings.validate()?;
        Ok(settings)
    }

    /// Writes the settings as pretty JSON, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context(CreateDirSnafu {
                stage: "create-settings-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(self).context(SerializeSettingsSnafu {
            stage: "serialize-settings-json",
        })?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-settings-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, path).context(RenameTempFileSnafu {
            stage: "rename-temporary-settings-file",
            from: temp_path,
            to: path.to_path_buf(),
        })?;

        tracing::info!(path = ?path, "saved settings");
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SettingsError {
    #[snafu(display("failed to read settings from {path:?} on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        path: PathBuf,
        source: figment::Error,
    },
    #[snafu(display("invalid setting `{key}` on `{stage}`: {details}"))]
    InvalidSetting {
        stage: &'static str,
        key: &'static str,
        details: String,
    },
    #[snafu(display("failed to create settings directory at {path:?} on `{stage}`: {source}"))]
    CreateDir {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to serialize settings on `{stage}`: {source}"))]
    SerializeSettings {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to write settings file at {path:?} on `{stage}`: {source}"))]
    WriteFile {
        stage: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display(
        "failed to replace settings file from {from:?} to {to:?} on `{stage}`: {source}"
    ))]
    RenameTempFile {
        stage: &'static str,
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_match_the_reply_scheduler() {
        let settings = ChatSettings::default();
        assert_eq!(settings.response_delay(), DEFAULT_RESPONSE_DELAY);
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let settings = ChatSettings::extract(Path::new("absent.json")).expect("extract");
            assert_eq!(settings, ChatSettings::default());
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE_NAME, r#"{ "response_delay_ms": 250 }"#)?;

            let settings = ChatSettings::extract(Path::new(SETTINGS_FILE_NAME)).expect("extract");
            assert_eq!(settings.response_delay(), Duration::from_millis(250));
            assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE_NAME,
                r#"{ "response_delay_ms": 250, "log_filter": "info" }"#,
            )?;
            jail.set_env("AGENT_FIRST_RESPONSE_DELAY_MS", "10");

            let settings = ChatSettings::extract(Path::new(SETTINGS_FILE_NAME)).expect("extract");
            assert_eq!(settings.response_delay_ms, 10);
            assert_eq!(settings.log_filter, "info");
            Ok(())
        });
    }

    #[test]
    fn blank_log_filter_is_normalized() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE_NAME, r#"{ "log_filter": "   " }"#)?;

            let settings = ChatSettings::extract(Path::new(SETTINGS_FILE_NAME)).expect("extract");
            assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
            Ok(())
        });
    }

    #[test]
    fn oversized_delay_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE_NAME, r#"{ "response_delay_ms": 600000 }"#)?;

            let error = ChatSettings::extract(Path::new(SETTINGS_FILE_NAME))
                .expect_err("delay over the limit");
            assert!(matches!(
                error,
                SettingsError::InvalidSetting {
                    key: "response_delay_ms",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_extract_error() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE_NAME, "{ not json")?;

            let error = ChatSettings::extract(Path::new(SETTINGS_FILE_NAME))
                .expect_err("malformed json");
            assert!(matches!(error, SettingsError::Extract { .. }));
            Ok(())
        });
    }

    #[test]
    fn saved_settings_are_read_back() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join(SETTINGS_FILE_NAME);
            let settings = ChatSettings {
                response_delay_ms: 42,
                log_filter: "debug".to_string(),
            };

            settings.save(&path).expect("save");
            assert!(!path.with_extension("json.tmp").exists());
            assert_eq!(ChatSettings::extract(&path).expect("extract"), settings);
            Ok(())
        });
    }
}
