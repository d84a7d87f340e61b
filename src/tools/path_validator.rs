use anyhow::{Result, bail};
use std::path::Path;

/// 確認路徑存在且是資料夾，批次開始前的前置檢查
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("尚未選擇資料夾");
    }
    if !path.exists() {
        bail!("資料夾不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}
