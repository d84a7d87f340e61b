use super::classifier::{ProcessingResult, classify_file};
use crate::tools::{scan_image_files, validate_directory_exists};
use anyhow::Result;
use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// 進度回呼：已完成數、總數、目前狀態訊息
///
/// 批次開始時會以 `(0, total, 就緒訊息)` 呼叫一次，之後每完成一個
/// 檔案（成功或失敗）呼叫一次。呼叫之間以鎖序列化，不會交錯。
pub type ProgressFn<'a> = dyn Fn(usize, usize, &str) + Sync + 'a;

/// 批次處理結果統計
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 符合條件的檔案總數
    pub total: usize,
    /// 成功移動的檔案數
    pub succeeded: usize,
    /// 處理失敗的檔案數
    pub failed: usize,
    /// 因中斷訊號而未開始處理的檔案數
    pub skipped: usize,
    /// 失敗訊息清單（順序不保證與排程順序一致）
    pub failures: Vec<String>,
}

impl BatchReport {
    /// 來源資料夾沒有任何符合條件的檔案
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// 批次分類處理器
///
/// 列舉來源資料夾的圖片檔案，透過 rayon 的 worker pool（依 CPU 數量
/// 限制平行度）逐一分類，彙整每個檔案的結果。
pub struct BatchProcessor {
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchProcessor {
    #[must_use]
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    /// 執行一次批次處理
    ///
    /// 前置檢查失敗（路徑不存在）或來源資料夾無法列舉時回傳錯誤；
    /// 單一檔案的失敗只會記錄在回報中，不會中斷批次。
    pub fn run(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        on_progress: &ProgressFn<'_>,
    ) -> Result<BatchReport> {
        validate_directory_exists(source_dir)?;
        validate_directory_exists(dest_dir)?;

        let files = scan_image_files(source_dir)?;
        let total = files.len();

        on_progress(0, total, "就緒");

        if total == 0 {
            info!("來源資料夾沒有圖片檔案: {}", source_dir.display());
            return Ok(BatchReport::default());
        }

        info!("開始批次處理，共 {total} 個圖片檔案");

        let processed = AtomicUsize::new(0);
        let progress_lock = Mutex::new(());

        let results: Vec<ProcessingResult> = files
            .par_iter()
            .filter_map(|file| {
                // 收到中斷訊號後不再開始新的檔案，執行中的照常跑完
                if self.shutdown_signal.load(Ordering::SeqCst) {
                    return None;
                }

                let result = classify_file(file, dest_dir);
                let done = processed.fetch_add(1, Ordering::SeqCst) + 1;

                let message = match &result {
                    ProcessingResult::Moved(name) => format!("正在處理: {name}"),
                    ProcessingResult::Failed(name, reason) => {
                        format!("處理 {name} 失敗: {reason}")
                    }
                };

                // 即使鎖曾被毒化也要送出進度，每個檔案恰好通知一次
                {
                    let _guard = progress_lock
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner);
                    on_progress(done, total, &message);
                }

                Some(result)
            })
            .collect();

        let skipped = total - results.len();
        if skipped > 0 {
            warn!("收到中斷訊號，{skipped} 個檔案未處理");
        }

        let mut report = BatchReport {
            total,
            skipped,
            ..BatchReport::default()
        };

        for result in results {
            match result {
                ProcessingResult::Moved(_) => report.succeeded += 1,
                ProcessingResult::Failed(name, reason) => {
                    report.failed += 1;
                    report.failures.push(format!("{name}: {reason}"));
                }
            }
        }

        info!(
            "批次處理完成 - 成功: {}, 失敗: {}, 未處理: {}",
            report.succeeded, report.failed, report.skipped
        );

        Ok(report)
    }
}
