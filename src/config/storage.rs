use std::fs;
use std::path::PathBuf;

use crate::config::settings::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    DirNotFound,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The directory all persisted app state lives in.
pub(crate) fn default_app_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::DirNotFound)?;
    Ok(config_dir.join("com.niz.app"))
}

/// Persisted settings, one JSON file in the app directory.
///
/// A missing file yields defaults; loaded configs get empty API keys
/// filled from the environment before they reach any service factory.
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store under the platform config directory.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            dir: default_app_dir()?,
        })
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join("config.json")
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(AppConfig::default().with_env_keys());
        }

        let content = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config.with_env_keys())
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.config_path();
        tracing::info!("Saving config to: {:?}", path);
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&path, &content)?;
        Ok(())
    }
}

/// 加载配置
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ConfigStore::new()?.load()
}

/// 保存配置
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    ConfigStore::new()?.save(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path());
        let config = store.load().unwrap();
        assert_eq!(config.stt.model, "whisper-1");
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(dir.path());

        let mut config = AppConfig::default();
        config.chat.model = "gpt-4-turbo".to_string();
        store.save(&config).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.chat.model, "gpt-4-turbo");
        assert_eq!(loaded.voice.language, "tr-TR");
    }
}
