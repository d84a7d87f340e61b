use crate::config::types::{Config, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    /// 載入設定，settings.json 不存在或壞掉時使用預設值
    pub fn new() -> Result<Self> {
        let settings = Self::load_settings().unwrap_or_default();
        Ok(Self { settings })
    }

    fn load_settings() -> Result<UserSettings> {
        let path = Path::new("settings.json");
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
