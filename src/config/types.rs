use serde::{Deserialize, Serialize};
use std::fmt;

/// 路徑歷史保留的筆數上限
pub const MAX_RECENT_PATHS: usize = 5;

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZhTw => "zh-TW",
            Self::EnUs => "en-US",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ZhTw => "繁體中文",
            Self::EnUs => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// 使用者設定，儲存於工作目錄的 settings.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    /// 最近使用過的來源資料夾
    pub recent_source_paths: Vec<String>,
    /// 最近使用過的目的資料夾
    pub recent_dest_paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
}
