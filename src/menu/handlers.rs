use crate::component::PhotoSorter;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_photo_sorter(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    // 每次執行重新載入設定，才看得到上一輪剛存入的路徑歷史
    let config = Config::new()?;
    let sorter = PhotoSorter::new(config, Arc::clone(shutdown_signal));

    if let Err(e) = sorter.run() {
        eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
