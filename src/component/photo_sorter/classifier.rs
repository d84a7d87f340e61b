use crate::tools::{ensure_month_folder, extract_capture_date};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 單一檔案的處理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// 已移動到年月資料夾
    Moved(String),
    /// 處理失敗（檔名、原因）
    Failed(String, String),
}

/// 分類單一檔案：取得拍攝日期、確保年月資料夾存在、移動檔案
///
/// 任何一步失敗都轉成 `Failed`，不會中斷其他檔案的處理。
#[must_use]
pub fn classify_file(path: &Path, dest_root: &Path) -> ProcessingResult {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    match move_to_month_folder(path, dest_root) {
        Ok(target) => {
            debug!("已移動: {} -> {}", path.display(), target.display());
            ProcessingResult::Moved(file_name)
        }
        Err(e) => {
            warn!("處理檔案失敗 {}: {e:#}", path.display());
            ProcessingResult::Failed(file_name, format!("{e:#}"))
        }
    }
}

fn move_to_month_folder(path: &Path, dest_root: &Path) -> Result<PathBuf> {
    let date = extract_capture_date(path)?;
    let folder = ensure_month_folder(dest_root, date)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("無法取得檔案名稱: {}", path.display()))?;
    let target = folder.join(file_name);

    move_file(path, &target)?;
    Ok(target)
}

/// 移動檔案，目的地已有同名檔案時直接覆蓋
fn move_file(source: &Path, target: &Path) -> Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        // rename 在跨檔案系統（或 Windows 上目的地已存在）時會失敗，
        // 改用複製後刪除
        Err(rename_err) => copy_and_delete(source, target).with_context(|| {
            format!(
                "移動檔案失敗: {} -> {} (rename 錯誤: {rename_err})",
                source.display(),
                target.display()
            )
        }),
    }
}

fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)
        .with_context(|| format!("複製檔案失敗: {} -> {}", source.display(), target.display()))?;

    fs::remove_file(source)
        .with_context(|| format!("刪除原檔案失敗: {}", source.display()))?;

    Ok(())
}
