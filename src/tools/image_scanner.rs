use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 支援的圖片副檔名
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// 掃描來源資料夾第一層的圖片檔案（不遞迴進入子資料夾）
///
/// 回傳的清單是批次開始時的快照，之後新增的檔案不會被處理。
/// 來源資料夾無法讀取時回傳錯誤。
pub fn scan_image_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry =
            entry.with_context(|| format!("無法讀取來源資料夾: {}", directory.display()))?;

        if entry.file_type().is_file() && is_image_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// 檢查副檔名是否為支援的圖片格式（不分大小寫）
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_file_case_insensitive() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("b.JPEG")));
        assert!(is_image_file(Path::new("c.Png")));
        assert!(is_image_file(Path::new("d.GIF")));

        assert!(!is_image_file(Path::new("e.txt")));
        assert!(!is_image_file(Path::new("f.mp4")));
        assert!(!is_image_file(Path::new("noext")));
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        fs::write(base.join("a.jpg"), "x").unwrap();
        fs::write(base.join("b.PNG"), "x").unwrap();
        fs::write(base.join("c.txt"), "x").unwrap();
        fs::write(base.join("d.raw"), "x").unwrap();

        let mut files = scan_image_files(base).unwrap();
        files.sort();

        assert_eq!(files, vec![base.join("a.jpg"), base.join("b.PNG")]);
    }

    #[test]
    fn test_scan_does_not_recurse() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        fs::create_dir(base.join("nested")).unwrap();
        fs::write(base.join("nested/deep.jpg"), "x").unwrap();
        fs::write(base.join("top.jpg"), "x").unwrap();

        let files = scan_image_files(base).unwrap();

        assert_eq!(files, vec![base.join("top.jpg")]);
    }

    #[test]
    fn test_scan_ignores_directories_named_like_images() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("folder.jpg")).unwrap();

        let files = scan_image_files(temp_dir.path()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = scan_image_files(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(scan_image_files(&missing).is_err());
    }
}
