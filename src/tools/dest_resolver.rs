use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io;
use std::path::{Path, PathBuf};

/// 依拍攝日期計算年月資料夾名稱（YYYY-MM）
#[must_use]
pub fn month_folder_name(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// 確保目的地下的年月資料夾存在，回傳資料夾路徑
///
/// 多個 worker 可能同時處理同一個年月，其他 worker 搶先建立時不視為
/// 錯誤；只有真正的 I/O 失敗（權限不足、磁碟已滿）才回傳錯誤。
pub fn ensure_month_folder(dest_root: &Path, date: NaiveDate) -> Result<PathBuf> {
    let folder = dest_root.join(month_folder_name(date));

    match std::fs::create_dir_all(&folder) {
        Ok(()) => Ok(folder),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && folder.is_dir() => Ok(folder),
        Err(e) => {
            Err(e).with_context(|| format!("無法建立年月資料夾: {}", folder.display()))
        }
    }
}
