use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::utils::{app_data_dir, ensure_dir};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default projection length, in months ahead of the current pay.
    pub horizon_months: u32,
    pub currency_symbol: String,
    #[serde(default)]
    pub quiet_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon_months: 6,
            currency_symbol: "₱".into(),
            quiet_mode: false,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(root: Option<PathBuf>) -> Result<Self, CoreError> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self {
            path: root.join(CONFIG_FILE),
        })
    }

    pub fn new_default() -> Result<Self, CoreError> {
        Self::new(None)
    }

    pub fn load(&self) -> Result<Config, CoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)
                .map_err(|err| CoreError::Config(err.to_string()))?;
            if config.horizon_months < 1 {
                return Err(CoreError::Config(
                    "horizon_months must be at least 1".into(),
                ));
            }
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();
        let config = Config {
            horizon_months: 3,
            currency_symbol: "$".into(),
            quiet_mode: true,
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();
        fs::write(
            manager.path(),
            r#"{"horizon_months":0,"currency_symbol":"$"}"#,
        )
        .unwrap();
        assert!(manager.load().is_err());
    }
}
