//! 照片分類主模組
//!
//! 負責互動流程：詢問來源與目的資料夾、確認後執行批次處理並顯示結果

use super::batch::{BatchProcessor, BatchReport};
use crate::config::Config;
use crate::config::save::{add_recent_path, save_settings};
use crate::tools::validate_directory_exists;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 照片依拍攝日期分類元件
pub struct PhotoSorter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl PhotoSorter {
    #[must_use]
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 照片依拍攝日期分類 ===").cyan().bold());

        let Some(source) =
            self.prompt_path("請輸入來源資料夾路徑", &self.config.settings.recent_source_paths)?
        else {
            return Ok(()); // ESC pressed
        };
        let source_dir = PathBuf::from(&source);
        validate_directory_exists(&source_dir)?;

        let Some(dest) =
            self.prompt_path("請輸入目的資料夾路徑", &self.config.settings.recent_dest_paths)?
        else {
            return Ok(());
        };
        let dest_dir = PathBuf::from(&dest);
        validate_directory_exists(&dest_dir)?;

        self.remember_paths(&source, &dest);

        if !self.confirm_run(&source_dir, &dest_dir)? {
            println!("{}", style("操作已取消").yellow());
            return Ok(());
        }

        if self.shutdown_signal.load(Ordering::SeqCst) {
            warn!("收到中斷訊號，停止處理");
            return Ok(());
        }

        println!("{}", style("處理檔案中...").cyan());
        let report = self.execute_batch(&source_dir, &dest_dir)?;
        self.display_summary(&report);

        Ok(())
    }

    /// 詢問路徑，有歷史紀錄時先列出供選擇
    fn prompt_path(&self, prompt: &str, recent_paths: &[String]) -> Result<Option<String>> {
        if recent_paths.is_empty() {
            let path: String = Input::new().with_prompt(prompt).interact_text()?;
            return Ok(Some(path.trim().to_string()));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let exists = Path::new(p).is_dir();
                let indicator = if exists { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push("輸入新路徑...".to_string());

        println!("{}", style("(按 ESC 返回主選單)").dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => {
                let path: String = Input::new().with_prompt(prompt).interact_text()?;
                Ok(Some(path.trim().to_string()))
            }
        }
    }

    /// 更新路徑歷史並儲存設定
    fn remember_paths(&self, source: &str, dest: &str) {
        let mut settings = self.config.settings.clone();
        add_recent_path(&mut settings.recent_source_paths, source);
        add_recent_path(&mut settings.recent_dest_paths, dest);

        if let Err(e) = save_settings(&settings) {
            warn!("無法儲存路徑歷史: {e}");
        }
    }

    fn confirm_run(&self, source_dir: &Path, dest_dir: &Path) -> Result<bool> {
        println!();
        println!("  {} {}", style("來源:").dim(), source_dir.display());
        println!("  {} {}", style("目的:").dim(), dest_dir.display());
        println!();

        let confirmed = Confirm::new()
            .with_prompt("確定要開始分類嗎？（同名檔案會被覆蓋）")
            .default(true)
            .interact()?;
        Ok(confirmed)
    }

    /// 執行批次處理，進度回呼驅動進度條
    fn execute_batch(&self, source_dir: &Path, dest_dir: &Path) -> Result<BatchReport> {
        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );

        let processor = BatchProcessor::new(Arc::clone(&self.shutdown_signal));
        let report = processor.run(source_dir, dest_dir, &|done, total, message| {
            if done == 0 {
                progress_bar.set_length(total as u64);
            } else {
                progress_bar.set_position(done as u64);
            }
            progress_bar.set_message(message.to_string());
        })?;

        if report.skipped > 0 {
            progress_bar.abandon_with_message("操作已中斷");
        } else {
            progress_bar.finish_with_message("完成");
        }

        Ok(report)
    }

    fn display_summary(&self, report: &BatchReport) {
        println!();

        if report.is_empty() {
            println!("{}", style("來源資料夾中沒有找到圖片檔案").yellow());
            return;
        }

        println!("{}", style("=== 分類結果 ===").cyan().bold());
        println!("  總數: {} 個檔案", report.total);
        println!("  成功: {} 個", style(report.succeeded).green());

        if report.skipped > 0 {
            println!("  未處理: {} 個", style(report.skipped).yellow());
        }

        if report.has_failures() {
            println!("  失敗: {} 個", style(report.failed).red());
            println!();
            println!("{}", style("失敗清單:").dim());
            for failure in &report.failures {
                println!("  {} {}", style("•").dim(), failure);
            }
        }
    }
}
